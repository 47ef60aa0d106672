//! Alias tables mapping natural-language tokens to canonical codes.
//!
//! Every lookup returns `Option<&'static str>`: `None` means the token is not
//! a known alias. Call sites that accept unknown tokens as already-canonical
//! use the `normalize_*` wrappers, which make that pass-through explicit.

/// A static alias → canonical-code table with case-insensitive lookup.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl AliasTable {
    /// Create a table from `(alias, canonical)` pairs. Aliases must be lowercase.
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    /// Resolve an alias to its canonical code.
    pub fn lookup(&self, alias: &str) -> Option<&'static str> {
        let key = alias_key(alias);
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, canonical)| *canonical)
    }

    /// Table name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of aliases in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the distinct canonical codes, in first-seen order.
    pub fn canonical_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, (_, code))| !self.entries[..*i].iter().any(|(_, c)| c == code))
            .map(|(_, (_, code))| *code)
    }
}

/// Lowercase, trim, collapse inner whitespace, join a degree sign to its
/// letter and drop a leading "degree"/"degrees".
fn alias_key(alias: &str) -> String {
    let lowered = alias.trim().to_lowercase();
    let mut key = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    key = key.replace("° ", "°");
    for prefix in ["degrees ", "degree ", "deg "] {
        if let Some(rest) = key.strip_prefix(prefix) {
            key = rest.to_string();
            break;
        }
    }
    key
}

/// Temperature symbols and names → single-letter codes.
pub static TEMPERATURE_ALIASES: AliasTable = AliasTable::new(
    "temperature",
    &[
        ("c", "c"),
        ("°c", "c"),
        ("celsius", "c"),
        ("°celsius", "c"),
        ("centigrade", "c"),
        ("degc", "c"),
        ("f", "f"),
        ("°f", "f"),
        ("fahrenheit", "f"),
        ("°fahrenheit", "f"),
        ("degf", "f"),
        ("k", "k"),
        ("°k", "k"),
        ("kelvin", "k"),
        ("kelvins", "k"),
        ("r", "r"),
        ("°r", "r"),
        ("rankine", "r"),
        ("°ra", "r"),
    ],
);

/// Length, mass, volume, time and area names → canonical abbreviations.
pub static UNIT_ALIASES: AliasTable = AliasTable::new(
    "unit",
    &[
        // Length
        ("mm", "mm"),
        ("millimeter", "mm"),
        ("millimeters", "mm"),
        ("millimetre", "mm"),
        ("millimetres", "mm"),
        ("cm", "cm"),
        ("centimeter", "cm"),
        ("centimeters", "cm"),
        ("centimetre", "cm"),
        ("centimetres", "cm"),
        ("m", "m"),
        ("meter", "m"),
        ("meters", "m"),
        ("metre", "m"),
        ("metres", "m"),
        ("km", "km"),
        ("kms", "km"),
        ("kilometer", "km"),
        ("kilometers", "km"),
        ("kilometre", "km"),
        ("kilometres", "km"),
        ("in", "in"),
        ("inch", "in"),
        ("inches", "in"),
        ("ft", "ft"),
        ("foot", "ft"),
        ("feet", "ft"),
        ("yd", "yd"),
        ("yds", "yd"),
        ("yard", "yd"),
        ("yards", "yd"),
        ("mi", "mi"),
        ("mile", "mi"),
        ("miles", "mi"),
        ("nmi", "nmi"),
        ("nautical mile", "nmi"),
        ("nautical miles", "nmi"),
        // Mass
        ("mg", "mg"),
        ("milligram", "mg"),
        ("milligrams", "mg"),
        ("g", "g"),
        ("gram", "g"),
        ("grams", "g"),
        ("gramme", "g"),
        ("grammes", "g"),
        ("kg", "kg"),
        ("kgs", "kg"),
        ("kilo", "kg"),
        ("kilos", "kg"),
        ("kilogram", "kg"),
        ("kilograms", "kg"),
        ("t", "t"),
        ("tonne", "t"),
        ("tonnes", "t"),
        ("metric ton", "t"),
        ("metric tons", "t"),
        ("ton", "ton"),
        ("tons", "ton"),
        ("oz", "oz"),
        ("ounce", "oz"),
        ("ounces", "oz"),
        ("lb", "lb"),
        ("lbs", "lb"),
        ("pound", "lb"),
        ("pounds", "lb"),
        ("st", "st"),
        ("stone", "st"),
        ("stones", "st"),
        // Volume
        ("ml", "ml"),
        ("milliliter", "ml"),
        ("milliliters", "ml"),
        ("millilitre", "ml"),
        ("millilitres", "ml"),
        ("l", "l"),
        ("liter", "l"),
        ("liters", "l"),
        ("litre", "l"),
        ("litres", "l"),
        ("gal", "gal"),
        ("gallon", "gal"),
        ("gallons", "gal"),
        ("qt", "qt"),
        ("quart", "qt"),
        ("quarts", "qt"),
        ("pt", "pt"),
        ("pint", "pt"),
        ("pints", "pt"),
        ("cup", "cup"),
        ("cups", "cup"),
        ("floz", "floz"),
        ("fl oz", "floz"),
        ("fluid ounce", "floz"),
        ("fluid ounces", "floz"),
        ("tbsp", "tbsp"),
        ("tablespoon", "tbsp"),
        ("tablespoons", "tbsp"),
        ("tsp", "tsp"),
        ("teaspoon", "tsp"),
        ("teaspoons", "tsp"),
        ("m3", "m3"),
        ("m³", "m3"),
        ("cubic meter", "m3"),
        ("cubic meters", "m3"),
        ("cubic metre", "m3"),
        ("cubic metres", "m3"),
        ("ft3", "ft3"),
        ("cubic foot", "ft3"),
        ("cubic feet", "ft3"),
        // Time
        ("ms", "ms"),
        ("millisecond", "ms"),
        ("milliseconds", "ms"),
        ("s", "s"),
        ("sec", "s"),
        ("secs", "s"),
        ("second", "s"),
        ("seconds", "s"),
        ("min", "min"),
        ("mins", "min"),
        ("minute", "min"),
        ("minutes", "min"),
        ("h", "h"),
        ("hr", "h"),
        ("hrs", "h"),
        ("hour", "h"),
        ("hours", "h"),
        ("d", "d"),
        ("day", "d"),
        ("days", "d"),
        ("wk", "wk"),
        ("wks", "wk"),
        ("week", "wk"),
        ("weeks", "wk"),
        ("mo", "mo"),
        ("month", "mo"),
        ("months", "mo"),
        ("yr", "yr"),
        ("yrs", "yr"),
        ("year", "yr"),
        ("years", "yr"),
        // Area
        ("cm2", "cm2"),
        ("cm²", "cm2"),
        ("sq cm", "cm2"),
        ("square centimeter", "cm2"),
        ("square centimeters", "cm2"),
        ("m2", "m2"),
        ("m²", "m2"),
        ("sqm", "m2"),
        ("sq m", "m2"),
        ("square meter", "m2"),
        ("square meters", "m2"),
        ("square metre", "m2"),
        ("square metres", "m2"),
        ("km2", "km2"),
        ("km²", "km2"),
        ("sq km", "km2"),
        ("square kilometer", "km2"),
        ("square kilometers", "km2"),
        ("in2", "in2"),
        ("in²", "in2"),
        ("sq in", "in2"),
        ("square inch", "in2"),
        ("square inches", "in2"),
        ("ft2", "ft2"),
        ("ft²", "ft2"),
        ("sqft", "ft2"),
        ("sq ft", "ft2"),
        ("square foot", "ft2"),
        ("square feet", "ft2"),
        ("yd2", "yd2"),
        ("yd²", "yd2"),
        ("sq yd", "yd2"),
        ("square yard", "yd2"),
        ("square yards", "yd2"),
        ("mi2", "mi2"),
        ("mi²", "mi2"),
        ("sq mi", "mi2"),
        ("square mile", "mi2"),
        ("square miles", "mi2"),
        ("ac", "ac"),
        ("acre", "ac"),
        ("acres", "ac"),
        ("ha", "ha"),
        ("hectare", "ha"),
        ("hectares", "ha"),
    ],
);

/// Currency names and symbols → ISO 4217 codes.
///
/// Bare codes are not listed: upper-casing an unknown token already yields
/// the code.
pub static CURRENCY_ALIASES: AliasTable = AliasTable::new(
    "currency",
    &[
        ("$", "USD"),
        ("dollar", "USD"),
        ("dollars", "USD"),
        ("us dollar", "USD"),
        ("us dollars", "USD"),
        ("american dollar", "USD"),
        ("american dollars", "USD"),
        ("buck", "USD"),
        ("bucks", "USD"),
        ("€", "EUR"),
        ("euro", "EUR"),
        ("euros", "EUR"),
        ("£", "GBP"),
        ("pound", "GBP"),
        ("pounds", "GBP"),
        ("british pound", "GBP"),
        ("british pounds", "GBP"),
        ("pound sterling", "GBP"),
        ("sterling", "GBP"),
        ("quid", "GBP"),
        ("¥", "JPY"),
        ("yen", "JPY"),
        ("japanese yen", "JPY"),
        ("canadian dollar", "CAD"),
        ("canadian dollars", "CAD"),
        ("australian dollar", "AUD"),
        ("australian dollars", "AUD"),
        ("new zealand dollar", "NZD"),
        ("new zealand dollars", "NZD"),
        ("hong kong dollar", "HKD"),
        ("hong kong dollars", "HKD"),
        ("singapore dollar", "SGD"),
        ("singapore dollars", "SGD"),
        ("franc", "CHF"),
        ("francs", "CHF"),
        ("swiss franc", "CHF"),
        ("swiss francs", "CHF"),
        ("yuan", "CNY"),
        ("chinese yuan", "CNY"),
        ("renminbi", "CNY"),
        ("rmb", "CNY"),
        ("₹", "INR"),
        ("rupee", "INR"),
        ("rupees", "INR"),
        ("indian rupee", "INR"),
        ("indian rupees", "INR"),
        ("₩", "KRW"),
        ("won", "KRW"),
        ("korean won", "KRW"),
        ("south korean won", "KRW"),
        ("peso", "MXN"),
        ("pesos", "MXN"),
        ("mexican peso", "MXN"),
        ("mexican pesos", "MXN"),
        ("real", "BRL"),
        ("reais", "BRL"),
        ("brazilian real", "BRL"),
        ("ruble", "RUB"),
        ("rubles", "RUB"),
        ("rouble", "RUB"),
        ("roubles", "RUB"),
        ("krona", "SEK"),
        ("kronor", "SEK"),
        ("swedish krona", "SEK"),
        ("rand", "ZAR"),
        ("lira", "TRY"),
        ("turkish lira", "TRY"),
        ("baht", "THB"),
        ("bitcoin", "BTC"),
    ],
);

/// Timezone abbreviations, regions and cities → IANA identifiers.
pub static TIMEZONE_ALIASES: AliasTable = AliasTable::new(
    "timezone",
    &[
        // North America
        ("est", "America/New_York"),
        ("edt", "America/New_York"),
        ("et", "America/New_York"),
        ("eastern", "America/New_York"),
        ("cst", "America/Chicago"),
        ("cdt", "America/Chicago"),
        ("ct", "America/Chicago"),
        ("central", "America/Chicago"),
        ("mst", "America/Denver"),
        ("mdt", "America/Denver"),
        ("mt", "America/Denver"),
        ("mountain", "America/Denver"),
        ("pst", "America/Los_Angeles"),
        ("pdt", "America/Los_Angeles"),
        ("pt", "America/Los_Angeles"),
        ("pacific", "America/Los_Angeles"),
        ("akst", "America/Anchorage"),
        ("hst", "Pacific/Honolulu"),
        ("new york", "America/New_York"),
        ("nyc", "America/New_York"),
        ("boston", "America/New_York"),
        ("miami", "America/New_York"),
        ("toronto", "America/Toronto"),
        ("chicago", "America/Chicago"),
        ("denver", "America/Denver"),
        ("phoenix", "America/Phoenix"),
        ("los angeles", "America/Los_Angeles"),
        ("la", "America/Los_Angeles"),
        ("san francisco", "America/Los_Angeles"),
        ("sf", "America/Los_Angeles"),
        ("seattle", "America/Los_Angeles"),
        ("vancouver", "America/Vancouver"),
        ("mexico city", "America/Mexico_City"),
        ("honolulu", "Pacific/Honolulu"),
        ("hawaii", "Pacific/Honolulu"),
        // UTC / Europe
        ("utc", "UTC"),
        ("gmt", "Etc/GMT"),
        ("z", "UTC"),
        ("bst", "Europe/London"),
        ("wet", "Europe/Lisbon"),
        ("cet", "Europe/Paris"),
        ("cest", "Europe/Paris"),
        ("eet", "Europe/Athens"),
        ("eest", "Europe/Athens"),
        ("msk", "Europe/Moscow"),
        ("london", "Europe/London"),
        ("uk", "Europe/London"),
        ("dublin", "Europe/Dublin"),
        ("lisbon", "Europe/Lisbon"),
        ("paris", "Europe/Paris"),
        ("berlin", "Europe/Berlin"),
        ("amsterdam", "Europe/Amsterdam"),
        ("madrid", "Europe/Madrid"),
        ("rome", "Europe/Rome"),
        ("zurich", "Europe/Zurich"),
        ("stockholm", "Europe/Stockholm"),
        ("athens", "Europe/Athens"),
        ("istanbul", "Europe/Istanbul"),
        ("moscow", "Europe/Moscow"),
        // Asia / Middle East
        ("ist", "Asia/Kolkata"),
        ("india", "Asia/Kolkata"),
        ("mumbai", "Asia/Kolkata"),
        ("delhi", "Asia/Kolkata"),
        ("dubai", "Asia/Dubai"),
        ("gst", "Asia/Dubai"),
        ("bangkok", "Asia/Bangkok"),
        ("sgt", "Asia/Singapore"),
        ("singapore", "Asia/Singapore"),
        ("hkt", "Asia/Hong_Kong"),
        ("hong kong", "Asia/Hong_Kong"),
        ("beijing", "Asia/Shanghai"),
        ("shanghai", "Asia/Shanghai"),
        ("china", "Asia/Shanghai"),
        ("kst", "Asia/Seoul"),
        ("seoul", "Asia/Seoul"),
        ("korea", "Asia/Seoul"),
        ("jst", "Asia/Tokyo"),
        ("tokyo", "Asia/Tokyo"),
        ("japan", "Asia/Tokyo"),
        // Oceania
        ("aest", "Australia/Sydney"),
        ("aedt", "Australia/Sydney"),
        ("acst", "Australia/Adelaide"),
        ("awst", "Australia/Perth"),
        ("sydney", "Australia/Sydney"),
        ("melbourne", "Australia/Melbourne"),
        ("brisbane", "Australia/Brisbane"),
        ("perth", "Australia/Perth"),
        ("nzst", "Pacific/Auckland"),
        ("nzdt", "Pacific/Auckland"),
        ("auckland", "Pacific/Auckland"),
        // Others
        ("sao paulo", "America/Sao_Paulo"),
        ("brazil", "America/Sao_Paulo"),
        ("cairo", "Africa/Cairo"),
        ("johannesburg", "Africa/Johannesburg"),
        ("lagos", "Africa/Lagos"),
    ],
);

/// Resolve a temperature symbol or name to `c`, `f`, `k` or `r`.
pub fn canonical_temperature(token: &str) -> Option<&'static str> {
    TEMPERATURE_ALIASES.lookup(token)
}

/// Resolve any unit token, temperature first.
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    canonical_temperature(token).or_else(|| UNIT_ALIASES.lookup(token))
}

/// Resolve a currency name, symbol or code to a 3-letter code.
pub fn canonical_currency(token: &str) -> Option<&'static str> {
    CURRENCY_ALIASES.lookup(token)
}

/// Resolve a timezone alias to an IANA identifier.
pub fn canonical_timezone(token: &str) -> Option<&'static str> {
    TIMEZONE_ALIASES.lookup(token)
}

/// Canonical unit code, or the trimmed token unchanged when unknown.
pub fn normalize_unit(token: &str) -> String {
    canonical_unit(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.trim().to_string())
}

/// Canonical currency code, or the token upper-cased when unknown.
pub fn normalize_currency(token: &str) -> String {
    canonical_currency(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.trim().to_uppercase())
}

/// IANA zone for an alias, or the trimmed token unchanged when unknown.
pub fn normalize_timezone(token: &str) -> String {
    canonical_timezone(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_aliases() {
        assert_eq!(canonical_temperature("°C"), Some("c"));
        assert_eq!(canonical_temperature("° F"), Some("f"));
        assert_eq!(canonical_temperature("Celsius"), Some("c"));
        assert_eq!(canonical_temperature("degrees fahrenheit"), Some("f"));
        assert_eq!(canonical_temperature("K"), Some("k"));
        assert_eq!(canonical_temperature("rankine"), Some("r"));
        assert_eq!(canonical_temperature("miles"), None);
    }

    #[test]
    fn test_unit_aliases() {
        assert_eq!(canonical_unit("miles"), Some("mi"));
        assert_eq!(canonical_unit("Kilometres"), Some("km"));
        assert_eq!(canonical_unit("square   feet"), Some("ft2"));
        assert_eq!(canonical_unit("fl oz"), Some("floz"));
        assert_eq!(canonical_unit("LBS"), Some("lb"));
        assert_eq!(canonical_unit("hours"), Some("h"));
        assert_eq!(canonical_unit("°c"), Some("c"));
    }

    #[test]
    fn test_unknown_unit_passes_through() {
        assert_eq!(canonical_unit("furlongs"), None);
        assert_eq!(normalize_unit(" furlongs "), "furlongs");
        assert_eq!(normalize_unit("Feet"), "ft");
    }

    #[test]
    fn test_currency_aliases() {
        assert_eq!(normalize_currency("dollars"), "USD");
        assert_eq!(normalize_currency("Pounds"), "GBP");
        assert_eq!(normalize_currency("yen"), "JPY");
        assert_eq!(normalize_currency("canadian dollars"), "CAD");
        assert_eq!(normalize_currency("€"), "EUR");
        assert_eq!(normalize_currency("eur"), "EUR");
        assert_eq!(normalize_currency("xyz"), "XYZ");
        assert_eq!(canonical_currency("xyz"), None);
    }

    #[test]
    fn test_timezone_aliases() {
        assert_eq!(normalize_timezone("EST"), "America/New_York");
        assert_eq!(normalize_timezone("Tokyo"), "Asia/Tokyo");
        assert_eq!(normalize_timezone("new   york"), "America/New_York");
        assert_eq!(normalize_timezone("Europe/Paris"), "Europe/Paris");
    }

    #[test]
    fn test_canonical_codes_are_distinct() {
        let codes: Vec<_> = TEMPERATURE_ALIASES.canonical_codes().collect();
        assert_eq!(codes, vec!["c", "f", "k", "r"]);
        assert_eq!(TEMPERATURE_ALIASES.name(), "temperature");
        assert!(!UNIT_ALIASES.is_empty());
    }

    #[test]
    fn test_aliases_are_lowercase() {
        for table in [TEMPERATURE_ALIASES, UNIT_ALIASES, CURRENCY_ALIASES, TIMEZONE_ALIASES] {
            for (alias, _) in table.entries {
                assert_eq!(*alias, alias.to_lowercase(), "{} alias {}", table.name(), alias);
            }
        }
    }
}

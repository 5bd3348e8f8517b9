//! Nationality-name → three-letter country code table
//!
//! Covers the nationalities that actually occur across the crawled leagues.
//! Unknown nationalities fall back to the first three letters uppercased; the
//! fallback is deliberately lossy and is logged distinctly from a table hit
//! so bad codes can be traced back to their source string.

/// Looks up the fixed code for a nationality name.
pub fn country_code(nationality: &str) -> Option<&'static str> {
    let code = match nationality.trim().to_lowercase().as_str() {
        "albania" => "ALB",
        "algeria" => "ALG",
        "angola" => "ANG",
        "argentina" => "ARG",
        "armenia" => "ARM",
        "australia" => "AUS",
        "austria" => "AUT",
        "belgium" => "BEL",
        "bosnia-herzegovina" | "bosnia and herzegovina" => "BIH",
        "brazil" => "BRA",
        "bulgaria" => "BUL",
        "burkina faso" => "BFA",
        "cameroon" => "CMR",
        "canada" => "CAN",
        "chile" => "CHI",
        "china" => "CHN",
        "colombia" => "COL",
        "costa rica" => "CRC",
        "cote d'ivoire" | "ivory coast" => "CIV",
        "croatia" => "CRO",
        "czech republic" | "czechia" => "CZE",
        "denmark" => "DEN",
        "dr congo" | "congo dr" => "COD",
        "ecuador" => "ECU",
        "egypt" => "EGY",
        "england" => "ENG",
        "finland" => "FIN",
        "france" => "FRA",
        "gabon" => "GAB",
        "gambia" => "GAM",
        "georgia" => "GEO",
        "germany" => "GER",
        "ghana" => "GHA",
        "greece" => "GRE",
        "guinea" => "GUI",
        "hungary" => "HUN",
        "iceland" => "ISL",
        "iran" => "IRN",
        "ireland" | "republic of ireland" => "IRL",
        "israel" => "ISR",
        "italy" => "ITA",
        "jamaica" => "JAM",
        "japan" => "JPN",
        "kosovo" => "KOS",
        "mali" => "MLI",
        "mexico" => "MEX",
        "montenegro" => "MNE",
        "morocco" => "MAR",
        "netherlands" => "NED",
        "new zealand" => "NZL",
        "nigeria" => "NGA",
        "north macedonia" => "MKD",
        "northern ireland" => "NIR",
        "norway" => "NOR",
        "paraguay" => "PAR",
        "peru" => "PER",
        "poland" => "POL",
        "portugal" => "POR",
        "romania" => "ROU",
        "russia" => "RUS",
        "saudi arabia" => "KSA",
        "scotland" => "SCO",
        "senegal" => "SEN",
        "serbia" => "SRB",
        "slovakia" => "SVK",
        "slovenia" => "SVN",
        "south korea" | "korea, south" => "KOR",
        "spain" => "ESP",
        "suriname" => "SUR",
        "sweden" => "SWE",
        "switzerland" => "SUI",
        "tunisia" => "TUN",
        "turkey" | "türkiye" => "TUR",
        "ukraine" => "UKR",
        "united states" | "usa" => "USA",
        "uruguay" => "URU",
        "uzbekistan" => "UZB",
        "venezuela" => "VEN",
        "wales" => "WAL",
        "zambia" => "ZAM",
        "zimbabwe" => "ZIM",
        _ => return None,
    };
    Some(code)
}

/// Resolves a nationality to its code, falling back to the first three
/// letters of the string, uppercased, when the table has no entry.
pub fn country_code_or_fallback(nationality: &str) -> String {
    match country_code(nationality) {
        Some(code) => code.to_string(),
        None => {
            let fallback: String = nationality
                .trim()
                .chars()
                .take(3)
                .collect::<String>()
                .to_uppercase();
            tracing::warn!(
                "No code table entry for nationality '{}', using lossy fallback '{}'",
                nationality.trim(),
                fallback
            );
            fallback
        }
    }
}

// File: atom.rs
// Atomic mass lookup for mass-weighted geometry.

use crate::error::RmsdError;

/// Atomic mass of an element symbol, case-insensitive.
///
/// Covers H through Og. Returns `None` for symbols without an entry.
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    let lower = symbol.to_ascii_lowercase();
    let mass = match lower.as_str() {
        "h" => 1.008,
        "he" => 4.003,
        "li" => 6.941,
        "be" => 9.012,
        "b" => 10.811,
        "c" => 12.011,
        "n" => 14.007,
        "o" => 15.999,
        "f" => 18.998,
        "ne" => 20.180,
        "na" => 22.990,
        "mg" => 24.305,
        "al" => 26.982,
        "si" => 28.086,
        "p" => 30.974,
        "s" => 32.066,
        "cl" => 35.453,
        "ar" => 39.948,
        "k" => 39.098,
        "ca" => 40.078,
        "sc" => 44.956,
        "ti" => 47.867,
        "v" => 50.942,
        "cr" => 51.996,
        "mn" => 54.938,
        "fe" => 55.845,
        "co" => 58.933,
        "ni" => 58.693,
        "cu" => 63.546,
        "zn" => 65.38,
        "ga" => 69.723,
        "ge" => 72.631,
        "as" => 74.922,
        "se" => 78.971,
        "br" => 79.904,
        "kr" => 84.798,
        "rb" => 84.468,
        "sr" => 87.62,
        "y" => 88.906,
        "zr" => 91.224,
        "nb" => 92.906,
        "mo" => 95.95,
        "tc" => 98.907,
        "ru" => 101.07,
        "rh" => 102.906,
        "pd" => 106.42,
        "ag" => 107.868,
        "cd" => 112.414,
        "in" => 114.818,
        "sn" => 118.711,
        "sb" => 121.760,
        "te" => 126.7,
        "i" => 126.904,
        "xe" => 131.294,
        "cs" => 132.905,
        "ba" => 137.328,
        "la" => 138.905,
        "ce" => 140.116,
        "pr" => 140.908,
        "nd" => 144.243,
        "pm" => 144.913,
        "sm" => 150.36,
        "eu" => 151.964,
        "gd" => 157.25,
        "tb" => 158.925,
        "dy" => 162.500,
        "ho" => 164.930,
        "er" => 167.259,
        "tm" => 168.934,
        "yb" => 173.055,
        "lu" => 174.967,
        "hf" => 178.49,
        "ta" => 180.948,
        "w" => 183.84,
        "re" => 186.207,
        "os" => 190.23,
        "ir" => 192.217,
        "pt" => 195.085,
        "au" => 196.967,
        "hg" => 200.592,
        "tl" => 204.383,
        "pb" => 207.2,
        "bi" => 208.980,
        "po" => 208.982,
        "at" => 209.987,
        "rn" => 222.081,
        "fr" => 223.020,
        "ra" => 226.025,
        "ac" => 227.028,
        "th" => 232.038,
        "pa" => 231.036,
        "u" => 238.029,
        "np" => 237.0,
        "pu" => 244.0,
        "am" => 243.0,
        "cm" => 247.0,
        "bk" => 247.0,
        "ct" => 251.0,
        "es" => 252.0,
        "fm" => 257.0,
        "md" => 258.0,
        "no" => 259.0,
        "lr" => 262.0,
        "rf" => 261.0,
        "db" => 262.0,
        "sg" => 266.0,
        "bh" => 264.0,
        "hs" => 269.0,
        "mt" => 268.0,
        "ds" => 271.0,
        "rg" => 272.0,
        "cn" => 285.0,
        "nh" => 284.0,
        "fl" => 289.0,
        "mc" => 288.0,
        "lv" => 292.0,
        "ts" => 294.0,
        "og" => 294.0,
        _ => return None,
    };
    Some(mass)
}

/// Same as [`atomic_mass`] but with a typed error for unknown symbols.
pub fn atomic_mass_checked(symbol: &str) -> Result<f64, RmsdError> {
    atomic_mass(symbol).ok_or_else(|| RmsdError::UnknownElement(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_mass_case_insensitive() {
        assert_eq!(atomic_mass("H"), atomic_mass("h"));
        assert_eq!(atomic_mass("Fe"), Some(55.845));
        assert_eq!(atomic_mass("FE"), Some(55.845));
    }

    #[test]
    fn test_unknown_element() {
        assert!(atomic_mass("Xx").is_none());
        assert!(matches!(
            atomic_mass_checked("Xx"),
            Err(RmsdError::UnknownElement(_))
        ));
    }
}

//! Indian numbering convention for display: thousand, lakh, crore.

const CRORE: f64 = 1e7;
const LAKH: f64 = 1e5;
const THOUSAND: f64 = 1e3;

/// Render a magnitude the way the dashboards print it.
///
/// Two decimals at or above one thousand, integer precision below.
/// Negative values are formatted by magnitude with a leading `-`;
/// non-finite values are printed as-is.
pub fn indian_number_format(n: f64) -> String {
    if !n.is_finite() {
        return format!("{n}");
    }
    if n.is_sign_negative() {
        let magnitude = indian_number_format(-n);
        // Rounds to zero: no sign.
        if magnitude == "0" {
            return magnitude;
        }
        return format!("-{magnitude}");
    }

    if n >= CRORE {
        format!("{:.2} crores", n / CRORE)
    } else if n >= LAKH {
        format!("{:.2} lakhs", n / LAKH)
    } else if n >= THOUSAND {
        format!("{:.2} thousands", n / THOUSAND)
    } else {
        format!("{n:.0}")
    }
}

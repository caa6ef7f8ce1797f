//! Currency symbols and money formatting for reports.

use std::borrow::Cow;

/// Symbol for a currency code, case-insensitive.
///
/// Missing codes render as `$`; unknown codes render as the upper-cased code.
pub fn currency_symbol(currency: Option<&str>) -> Cow<'static, str> {
    let Some(code) = currency.filter(|c| !c.trim().is_empty()) else {
        return Cow::Borrowed("$");
    };
    let code = code.trim().to_uppercase();
    let symbol = match code.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "RUB" => "₽",
        "UAH" => "₴",
        "KZT" => "₸",
        "GEL" => "₾",
        "TRY" => "₺",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "BRL" => "R$",
        "AUD" => "A$",
        "CAD" => "C$",
        "CHF" => "CHF",
        _ => return Cow::Owned(code),
    };
    Cow::Borrowed(symbol)
}

/// Render an amount with its currency symbol, e.g. `€12.5` or `$100`.
pub fn format_money(amount: f64, currency: Option<&str>) -> String {
    format!("{}{}", currency_symbol(currency), amount)
}

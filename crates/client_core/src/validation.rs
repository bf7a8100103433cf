use shared::protocol::ProductDraft;

pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const PRICE_INVALID: &str = "Preço inválido";

/// Client-side checks that run before any request is issued. Returns the
/// trimmed, parsed draft or the exact rejection message.
pub fn validate_draft(
    name: &str,
    price: &str,
    in_stock: bool,
) -> Result<ProductDraft, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }

    let price = match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => return Err(PRICE_INVALID),
    };

    Ok(ProductDraft {
        name: name.to_string(),
        price,
        in_stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trimmed_name_and_decimal_price() {
        let draft = validate_draft("  Cabo ", " 19.9 ", false).expect("valid draft");
        assert_eq!(draft.name, "Cabo");
        assert_eq!(draft.price, 19.9);
        assert!(!draft.in_stock);
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(validate_draft("Brinde", "0", true).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(validate_draft("   ", "10", true), Err(NAME_REQUIRED));
        assert_eq!(validate_draft("", "10", true), Err(NAME_REQUIRED));
    }

    #[test]
    fn non_numeric_negative_and_non_finite_prices_are_rejected() {
        for price in ["abc", "", "-5", "-0.01", "NaN", "inf"] {
            assert_eq!(
                validate_draft("Cabo", price, true),
                Err(PRICE_INVALID),
                "price {price:?}"
            );
        }
    }
}

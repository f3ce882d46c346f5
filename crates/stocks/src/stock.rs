use serde::{Deserialize, Serialize};

/// One tradable instrument as supplied by the stock-data collaborator.
///
/// The stocks module stores and forwards whole lists of these; it never reads
/// or validates the fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    pub id: u32,
    pub name: String,
    pub price: u64,
}

impl Stock {
    pub fn new(id: u32, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// A buy order as sent by the UI. Opaque to the stocks module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOrder {
    pub stock_id: u32,
    pub stock_price: u64,
    pub quantity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_uses_ui_field_names() {
        let order: StockOrder =
            serde_json::from_str(r#"{"stockId":1,"stockPrice":110,"quantity":5}"#).unwrap();
        assert_eq!(
            order,
            StockOrder {
                stock_id: 1,
                stock_price: 110,
                quantity: 5
            }
        );
    }
}

//! Catalog context: the bounded text projection of the catalog that
//! grounds assistant replies.

use crate::types::Product;

/// Sentinel for an empty in-stock listing ("no products available right now").
pub const EMPTY_IN_STOCK: &str = "Hakuna bidhaa zilizopo kwa sasa.";
/// Sentinel for an empty out-of-stock listing ("no products are sold out").
pub const EMPTY_OUT_OF_STOCK: &str = "Hakuna bidhaa zilizoisha.";

/// The two line-oriented listings handed to the assistant prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogContext {
    pub in_stock: String,
    pub out_of_stock: String,
}

impl CatalogContext {
    /// Project the full product set into the two listings.
    ///
    /// Pure function of its input: stock moves between assistant calls,
    /// so the result is rebuilt per call and never cached. Input order is
    /// preserved within each listing.
    pub fn build(products: &[Product]) -> Self {
        let mut in_stock = Vec::new();
        let mut out_of_stock = Vec::new();

        for product in products {
            if product.stock > 0 {
                let mut line = format!(
                    "- {} ({}) - bei TZS {} - zipo {}",
                    product.name,
                    product.brand.to_uppercase(),
                    format_price(product.price),
                    product.stock
                );
                if let Some(caption) = &product.caption {
                    if !caption.is_empty() {
                        line.push_str(" - ");
                        line.push_str(caption);
                    }
                }
                in_stock.push(line);
            } else {
                let mut line = format!("- {} ({})", product.name, product.brand.to_uppercase());
                if product.price != 0 {
                    line.push_str(" - bei TZS ");
                    line.push_str(&format_price(product.price));
                }
                out_of_stock.push(line);
            }
        }

        Self {
            in_stock: if in_stock.is_empty() {
                EMPTY_IN_STOCK.to_string()
            } else {
                in_stock.join("\n")
            },
            out_of_stock: if out_of_stock.is_empty() {
                EMPTY_OUT_OF_STOCK.to_string()
            } else {
                out_of_stock.join("\n")
            },
        }
    }
}

/// Format a whole-shilling amount with `,` thousands separators.
pub fn format_price(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

//! Basket line generation and amount arithmetic.

use rand::Rng;
use retail_types::{round2, BasketItem, Product};

/// Rounded amounts of a basket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub nett: f64,
    pub vat: f64,
    pub total: f64,
}

/// Draw `1..=max_items` lines, each a product picked with replacement and a
/// quantity in `1..=max_quantity`.
///
/// The same product may appear on several lines; lines are never merged.
/// `products` must not be empty.
pub fn draw_items<R: Rng>(
    rng: &mut R,
    products: &[Product],
    max_items: u32,
    max_quantity: u32,
) -> Vec<BasketItem> {
    let count = rng.gen_range(1..=max_items.max(1));

    (0..count)
        .map(|_| {
            let product = &products[rng.gen_range(0..products.len())];
            let quantity = rng.gen_range(1..=max_quantity.max(1));
            BasketItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                brand: product.brand.clone(),
                category: product.category.clone(),
                unit_price: product.price,
                quantity,
            }
        })
        .collect()
}

/// Compute `nett`, `vat` and `total` for the given lines.
pub fn totals(items: &[BasketItem], vat_rate: f64) -> Totals {
    let nett = round2(items.iter().map(BasketItem::line_amount).sum());
    let vat = round2(nett * vat_rate);
    let total = round2(nett + vat);
    Totals { nett, vat, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            brand: "Brand".to_string(),
            category: "Category".to_string(),
            price,
        }
    }

    fn item(price: f64, quantity: u32) -> BasketItem {
        BasketItem {
            product_id: "p".to_string(),
            name: "P".to_string(),
            brand: String::new(),
            category: String::new(),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_draw_items_respects_bounds() {
        let products = vec![product("p1", 10.0), product("p2", 2.5), product("p3", 7.99)];
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let items = draw_items(&mut rng, &products, 4, 3);
            assert!(!items.is_empty() && items.len() <= 4);
            for item in &items {
                assert!(item.quantity >= 1 && item.quantity <= 3);
                assert!(products.iter().any(|p| p.id == item.product_id));
            }
        }
    }

    #[test]
    fn test_draw_items_allows_duplicate_products() {
        let products = vec![product("only", 1.0)];
        let mut rng = StdRng::seed_from_u64(1);

        let longest = (0..200)
            .map(|_| draw_items(&mut rng, &products, 5, 1))
            .max_by_key(|items| items.len())
            .unwrap();

        assert!(longest.len() > 1);
        assert!(longest.iter().all(|item| item.product_id == "only"));
    }

    #[test]
    fn test_totals_arithmetic() {
        let items = vec![item(2.5, 1)];
        let totals = totals(&items, 0.15);
        assert_eq!(totals.nett, 2.5);
        assert_eq!(totals.vat, 0.38);
        assert_eq!(totals.total, 2.88);

        let items = vec![item(10.0, 1)];
        let totals = super::totals(&items, 0.15);
        assert_eq!(totals.nett, 10.0);
        assert_eq!(totals.vat, 1.5);
        assert_eq!(totals.total, 11.5);
    }

    #[test]
    fn test_totals_sum_lines_before_rounding() {
        let items = vec![item(0.333, 3), item(1.115, 1)];
        let totals = totals(&items, 0.0);
        // 0.999 + 1.115 = 2.114
        assert_eq!(totals.nett, 2.11);
        assert_eq!(totals.vat, 0.0);
        assert_eq!(totals.total, 2.11);
    }
}

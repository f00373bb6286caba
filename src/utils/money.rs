//! Shared total calculation for cart views and order snapshots.

pub fn line_total(price: f64, quantity: i32) -> f64 {
    price * f64::from(quantity)
}

pub fn order_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_total(price, quantity))
        .sum()
}

/// Amounts cross the API boundary rendered with two fraction digits.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_total() {
        assert_eq!(line_total(12.99, 3), 38.97);
    }

    #[test]
    fn total_over_several_lines() {
        let total = order_total([(12.99, 2), (8.99, 1)]);
        assert_eq!(format_amount(total), "34.97");
    }

    #[test]
    fn merged_line_scenario() {
        // food #1 added twice (qty 2 then 1) merges into one line of 3
        let total = order_total([(12.99, 3)]);
        assert_eq!(format_amount(total), "38.97");
    }

    #[test]
    fn empty_cart_total() {
        let lines: Vec<(f64, i32)> = Vec::new();
        assert_eq!(format_amount(order_total(lines)), "0.00");
    }

    #[test]
    fn rendering_pads_and_hides_float_noise() {
        assert_eq!(format_amount(10.0), "10.00");
        assert_eq!(format_amount(0.1 + 0.2), "0.30");
    }
}

use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    api::{
        Customer, CustomerPayload, Order, OrderItem, OrderPayload, OrderTotals, Product,
        ORDER_STATUSES,
    },
    utils::{
        format::{format_money, format_percent},
        lookup::LookupMap,
        table::Searchable,
        time::{format_date, parse_date_input},
    },
};

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.company.as_deref());
        fields
    }
}

/// Discount applies to the subtotal; tax applies after the discount.
pub fn order_totals(items: &[OrderItem], discount_percent: f64, tax_percent: f64) -> OrderTotals {
    let subtotal: f64 = items
        .iter()
        .map(|item| f64::from(item.quantity) * item.unit_price)
        .sum();
    let discount = subtotal * discount_percent / 100.0;
    let tax = (subtotal - discount) * tax_percent / 100.0;
    OrderTotals {
        subtotal,
        discount,
        tax,
        total: subtotal - discount + tax,
    }
}

pub fn totals_of(order: &Order) -> OrderTotals {
    order_totals(&order.items, order.discount_percent, order.tax_percent)
}

/// Statuses an order may move to from `status`.
pub fn allowed_transitions(status: &str) -> &'static [&'static str] {
    match status {
        "pending" => &["confirmed", "cancelled"],
        "confirmed" => &["shipped", "cancelled"],
        "shipped" => &["delivered"],
        _ => &[],
    }
}

pub fn can_transition(from: &str, to: &str) -> bool {
    allowed_transitions(from).contains(&to)
}

pub fn is_editable(order: &Order) -> bool {
    order.status == "pending"
}

pub fn order_status_color(status: &str) -> &'static str {
    match status {
        "pending" => "yellow",
        "confirmed" => "blue",
        "shipped" => "orange",
        "delivered" => "green",
        "cancelled" => "red",
        _ => "gray",
    }
}

/// Order decorated with its customer's name and computed totals.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order: Order,
    pub customer_name: String,
    pub totals: OrderTotals,
}

impl Searchable for OrderRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.order.order_number.as_str(), self.customer_name.as_str()]
    }
}

pub fn order_rows(orders: &[Order], customers: &LookupMap<Uuid, Customer>) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|order| OrderRow {
            order: order.clone(),
            customer_name: customers.label(&order.customer_id, |c| c.name.clone()),
            totals: totals_of(order),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesTiles {
    pub orders: usize,
    pub revenue: f64,
    pub average: f64,
    pub per_status: Vec<(&'static str, usize)>,
}

/// Revenue and average skip cancelled orders.
pub fn sales_tiles(rows: &[OrderRow]) -> SalesTiles {
    let billable: Vec<&OrderRow> = rows
        .iter()
        .filter(|row| row.order.status != "cancelled")
        .collect();
    let revenue: f64 = billable.iter().map(|row| row.totals.total).sum();
    let average = if billable.is_empty() {
        0.0
    } else {
        revenue / billable.len() as f64
    };
    let per_status = ORDER_STATUSES
        .iter()
        .map(|status| {
            (
                *status,
                rows.iter().filter(|row| row.order.status == *status).count(),
            )
        })
        .collect();
    SalesTiles {
        orders: rows.len(),
        revenue,
        average,
        per_status,
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn invoice_filename(order: &Order) -> String {
    format!("invoice-{}.html", order.order_number)
}

/// Standalone printable invoice document.
pub fn invoice_html(
    order: &Order,
    customer: Option<&Customer>,
    products: &LookupMap<Uuid, Product>,
) -> String {
    let totals = totals_of(order);
    let e = escape_html;

    let bill_to = match customer {
        Some(c) => {
            let mut lines = vec![format!("<strong>{}</strong>", e(&c.name))];
            for value in [&c.company, &c.email, &c.phone, &c.address].into_iter().flatten() {
                lines.push(e(value));
            }
            lines.join("<br>")
        }
        None => e(crate::utils::lookup::UNKNOWN_LABEL),
    };

    let rows: String = order
        .items
        .iter()
        .map(|item| {
            let name = products.label(&item.product_id, |p| format!("{} ({})", p.name, p.sku));
            format!(
                "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                e(&name),
                item.quantity,
                format_money(item.unit_price),
                format_money(f64::from(item.quantity) * item.unit_price)
            )
        })
        .collect();

    let notes = order
        .notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(|n| format!("<h3>Notes</h3><p>{}</p>", e(n)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Invoice {number}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; color: #222; }}
table {{ width: 100%; border-collapse: collapse; margin-top: 1rem; }}
th, td {{ border-bottom: 1px solid #ddd; padding: 0.4rem; text-align: left; }}
.num {{ text-align: right; }}
.totals td {{ border: none; }}
</style>
</head>
<body>
<h1>Invoice {number}</h1>
<p>Date: {date}<br>Status: {status}</p>
<h3>Bill to</h3>
<p>{bill_to}</p>
<table>
<thead><tr><th>Product</th><th class="num">Qty</th><th class="num">Unit price</th><th class="num">Amount</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<table class="totals">
<tr><td class="num">Subtotal</td><td class="num">{subtotal}</td></tr>
<tr><td class="num">Discount ({discount_pct})</td><td class="num">-{discount}</td></tr>
<tr><td class="num">Tax ({tax_pct})</td><td class="num">{tax}</td></tr>
<tr><td class="num"><strong>Total</strong></td><td class="num"><strong>{total}</strong></td></tr>
</table>
{notes}
</body>
</html>
"#,
        number = e(&order.order_number),
        date = format_date(Some(order.order_date)),
        status = e(&order.status),
        bill_to = bill_to,
        rows = rows,
        subtotal = format_money(totals.subtotal),
        discount_pct = format_percent(order.discount_percent),
        discount = format_money(totals.discount),
        tax_pct = format_percent(order.tax_percent),
        tax = format_money(totals.tax),
        total = format_money(totals.total),
        notes = notes,
    )
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
}

impl CustomerFormState {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
            company: customer.company.clone().unwrap_or_default(),
            address: customer.address.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<CustomerPayload, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        Ok(CustomerPayload {
            name: self.name.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            company: optional(&self.company),
            address: optional(&self.address),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub product_id: String,
    pub quantity: String,
    pub unit_price: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            quantity: "1".into(),
            unit_price: "0".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFormState {
    pub customer_id: String,
    pub order_date: String,
    pub discount_percent: String,
    pub tax_percent: String,
    pub notes: String,
    pub items: Vec<ItemDraft>,
}

fn parse_percent(value: &str, field: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let parsed: f64 = trimmed
        .parse()
        .map_err(|_| format!("{} must be a number", field))?;
    if !(0.0..=100.0).contains(&parsed) {
        return Err(format!("{} must be between 0 and 100", field));
    }
    Ok(parsed)
}

impl OrderFormState {
    pub fn new_on(date: chrono::NaiveDate) -> Self {
        Self {
            order_date: date.format("%Y-%m-%d").to_string(),
            discount_percent: "0".into(),
            tax_percent: "0".into(),
            items: vec![ItemDraft::default()],
            ..Self::default()
        }
    }

    pub fn from_order(order: &Order) -> Self {
        Self {
            customer_id: order.customer_id.to_string(),
            order_date: order.order_date.format("%Y-%m-%d").to_string(),
            discount_percent: order.discount_percent.to_string(),
            tax_percent: order.tax_percent.to_string(),
            notes: order.notes.clone().unwrap_or_default(),
            items: order
                .items
                .iter()
                .map(|item| ItemDraft {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity.to_string(),
                    unit_price: item.unit_price.to_string(),
                })
                .collect(),
        }
    }

    /// Picking a product pre-fills its list price.
    pub fn choose_product(&mut self, index: usize, product_id: &str, products: &LookupMap<Uuid, Product>) {
        if let Some(item) = self.items.get_mut(index) {
            item.product_id = product_id.to_string();
            if let Some(product) = Uuid::parse_str(product_id).ok().and_then(|id| products.get(&id)) {
                item.unit_price = product.price.to_string();
            }
        }
    }

    /// Lines that parse, for the live totals preview.
    pub fn preview_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .filter_map(|item| {
                Some(OrderItem {
                    product_id: Uuid::parse_str(item.product_id.trim()).ok()?,
                    quantity: item.quantity.trim().parse().ok()?,
                    unit_price: item.unit_price.trim().parse().ok()?,
                })
            })
            .collect()
    }

    pub fn preview_totals(&self) -> OrderTotals {
        order_totals(
            &self.preview_items(),
            self.discount_percent.trim().parse().unwrap_or(0.0),
            self.tax_percent.trim().parse().unwrap_or(0.0),
        )
    }

    pub fn to_payload(&self) -> Result<OrderPayload, String> {
        let customer_id =
            Uuid::parse_str(self.customer_id.trim()).map_err(|_| "Select a customer".to_string())?;
        let order_date = parse_date_input(&self.order_date)?.ok_or_else(|| "Order date is required".to_string())?;
        let discount_percent = parse_percent(&self.discount_percent, "Discount")?;
        let tax_percent = parse_percent(&self.tax_percent, "Tax")?;
        if self.items.is_empty() {
            return Err("Add at least one item".into());
        }
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());
        for (index, draft) in self.items.iter().enumerate() {
            let row = index + 1;
            let product_id = Uuid::parse_str(draft.product_id.trim())
                .map_err(|_| format!("Line {}: choose a product", row))?;
            let quantity: i32 = draft
                .quantity
                .trim()
                .parse()
                .map_err(|_| format!("Line {}: quantity must be a whole number", row))?;
            if quantity <= 0 {
                return Err(format!("Line {}: quantity must be greater than zero", row));
            }
            let unit_price: f64 = draft
                .unit_price
                .trim()
                .parse()
                .map_err(|_| format!("Line {}: unit price must be a number", row))?;
            if !unit_price.is_finite() || unit_price < 0.0 {
                return Err(format!("Line {}: unit price cannot be negative", row));
            }
            if !seen.insert(product_id) {
                return Err(format!("Line {}: product is listed twice", row));
            }
            items.push(OrderItem {
                product_id,
                quantity,
                unit_price,
            });
        }
        Ok(OrderPayload {
            customer_id,
            order_date,
            discount_percent,
            tax_percent,
            notes: optional(&self.notes),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{customer, date, id, item, order, product};
    use crate::utils::table::filter_by_search;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn totals_discount_before_tax() {
        let totals = order_totals(&[item(1, 2, 50.0), item(2, 1, 100.0)], 10.0, 8.0);
        assert!(approx(totals.subtotal, 200.0));
        assert!(approx(totals.discount, 20.0));
        assert!(approx(totals.tax, 14.4));
        assert!(approx(totals.total, 194.4));
    }

    #[test]
    fn empty_order_totals_are_zero() {
        assert_eq!(order_totals(&[], 15.0, 10.0), OrderTotals::default());
    }

    #[test]
    fn transitions_follow_the_lifecycle() {
        assert!(can_transition("pending", "confirmed"));
        assert!(can_transition("pending", "cancelled"));
        assert!(can_transition("confirmed", "shipped"));
        assert!(can_transition("confirmed", "cancelled"));
        assert!(can_transition("shipped", "delivered"));
        assert!(!can_transition("pending", "shipped"));
        assert!(!can_transition("shipped", "cancelled"));
        assert!(allowed_transitions("delivered").is_empty());
        assert!(allowed_transitions("cancelled").is_empty());
    }

    #[test]
    fn order_search_matches_number_and_joined_customer() {
        let customers = LookupMap::build(&[customer(1, "Globex Corp")], |c| c.id);
        let rows = order_rows(
            &[order(10, 1, "pending", vec![]), order(11, 2, "pending", vec![])],
            &customers,
        );
        assert_eq!(rows[1].customer_name, "Unknown");
        assert_eq!(filter_by_search(&rows, "globex").len(), 1);
        let number = rows[1].order.order_number.to_lowercase();
        assert_eq!(filter_by_search(&rows, &number).len(), 1);
    }

    #[test]
    fn customer_search_covers_company_and_email() {
        let mut acme = customer(1, "Jane Roe");
        acme.company = Some("Acme".into());
        acme.email = Some("jane@acme.test".into());
        let rows = vec![acme, customer(2, "John Doe")];
        assert_eq!(filter_by_search(&rows, "acme").len(), 1);
        assert_eq!(filter_by_search(&rows, "doe").len(), 1);
    }

    #[test]
    fn tiles_exclude_cancelled_revenue() {
        let customers = LookupMap::default();
        let rows = order_rows(
            &[
                order(1, 1, "pending", vec![item(1, 1, 100.0)]),
                order(2, 1, "delivered", vec![item(1, 3, 100.0)]),
                order(3, 1, "cancelled", vec![item(1, 5, 100.0)]),
            ],
            &customers,
        );
        let tiles = sales_tiles(&rows);
        assert_eq!(tiles.orders, 3);
        assert!(approx(tiles.revenue, 400.0));
        assert!(approx(tiles.average, 200.0));
        assert!(tiles.per_status.contains(&("cancelled", 1)));
        assert!(tiles.per_status.contains(&("shipped", 0)));
    }

    #[test]
    fn tiles_of_no_orders_have_zero_average() {
        let tiles = sales_tiles(&[]);
        assert_eq!(tiles.average, 0.0);
        assert_eq!(tiles.per_status.len(), ORDER_STATUSES.len());
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn invoice_escapes_customer_and_notes() {
        let mut buyer = customer(1, "<script>alert(1)</script>");
        buyer.company = Some("R&D Ltd".into());
        let mut sale = order(5, 1, "confirmed", vec![item(7, 2, 12.5)]);
        sale.notes = Some("Deliver <before> noon".into());
        let products = LookupMap::build(&[product(7, "WIDGET", 12.5)], |p| p.id);

        let html = invoice_html(&sale, Some(&buyer), &products);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("R&amp;D Ltd"));
        assert!(html.contains("Deliver &lt;before&gt; noon"));
        assert!(html.contains("Product WIDGET (WIDGET)"));
        assert!(html.contains("25.00"));
        assert!(html.contains(&sale.order_number));
        assert_eq!(invoice_filename(&sale), format!("invoice-{}.html", sale.order_number));
    }

    #[test]
    fn invoice_without_customer_says_unknown() {
        let sale = order(5, 1, "pending", vec![item(99, 1, 1.0)]);
        let html = invoice_html(&sale, None, &LookupMap::default());
        assert!(html.contains("<p>Unknown</p>"));
    }

    #[test]
    fn order_form_validates_lines() {
        let mut form = OrderFormState::new_on(date(2025, 3, 4));
        assert_eq!(form.to_payload().unwrap_err(), "Select a customer");
        form.customer_id = id(1).to_string();
        assert_eq!(form.to_payload().unwrap_err(), "Line 1: choose a product");
        form.items[0].product_id = id(7).to_string();
        form.items[0].unit_price = "12.5".into();
        form.discount_percent = "150".into();
        assert_eq!(form.to_payload().unwrap_err(), "Discount must be between 0 and 100");
        form.discount_percent = "10".into();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.items[0].quantity, 1);
        assert_eq!(payload.discount_percent, 10.0);
        assert_eq!(payload.order_date, date(2025, 3, 4));
    }

    #[test]
    fn choosing_a_product_fills_its_price() {
        let products = LookupMap::build(&[product(7, "WIDGET", 12.5)], |p| p.id);
        let mut form = OrderFormState::new_on(date(2025, 3, 4));
        form.choose_product(0, &id(7).to_string(), &products);
        assert_eq!(form.items[0].unit_price, "12.5");
        assert!(approx(form.preview_totals().total, 12.5));
    }
}

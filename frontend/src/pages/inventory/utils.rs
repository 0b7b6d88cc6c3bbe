use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    api::{
        BatchDetail, BatchItem, BatchPayload, BomLine, BomLinePayload, Component, ComponentPayload,
        Product, ProductPayload, Supplier, SupplierPayload, BATCH_STATUSES,
    },
    utils::{lookup::LookupMap, table::Searchable, time::parse_date_input},
};

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.contact_name.as_deref());
        fields.extend(self.email.as_deref());
        fields
    }
}

impl Searchable for Component {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.sku.as_str()]
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.sku.as_str()]
    }
}

impl Searchable for BatchDetail {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.batch.batch_code.as_str()]
    }
}

/// Tabs of the inventory page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryTab {
    #[default]
    Components,
    Products,
    Suppliers,
    Batches,
}

impl InventoryTab {
    pub const ALL: [InventoryTab; 4] = [
        InventoryTab::Components,
        InventoryTab::Products,
        InventoryTab::Suppliers,
        InventoryTab::Batches,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InventoryTab::Components => "Components",
            InventoryTab::Products => "Products",
            InventoryTab::Suppliers => "Suppliers",
            InventoryTab::Batches => "Batches",
        }
    }

    pub fn search_placeholder(&self) -> &'static str {
        match self {
            InventoryTab::Components | InventoryTab::Products => "Search name or SKU",
            InventoryTab::Suppliers => "Search name, contact or email",
            InventoryTab::Batches => "Search batch code",
        }
    }
}

pub fn is_low_stock(component: &Component) -> bool {
    component.stock_quantity <= component.reorder_level
}

pub fn stock_value(components: &[Component]) -> f64 {
    components
        .iter()
        .map(|c| f64::from(c.stock_quantity) * c.unit_cost)
        .sum()
}

/// BOM lines grouped by product.
pub fn bom_by_product(lines: &[BomLine]) -> HashMap<Uuid, Vec<BomLine>> {
    let mut grouped: HashMap<Uuid, Vec<BomLine>> = HashMap::new();
    for line in lines {
        grouped.entry(line.product_id).or_default().push(line.clone());
    }
    grouped
}

/// How many units the current stock can build. `None` when the product
/// has no BOM; zero when a referenced component no longer exists.
pub fn buildable_units(bom: &[BomLine], components: &LookupMap<Uuid, Component>) -> Option<i32> {
    if bom.is_empty() {
        return None;
    }
    let mut units = i32::MAX;
    for line in bom {
        let Some(component) = components.get(&line.component_id) else {
            return Some(0);
        };
        if line.quantity <= 0 {
            continue;
        }
        units = units.min(component.stock_quantity.max(0) / line.quantity);
    }
    Some(if units == i32::MAX { 0 } else { units })
}

/// Material cost of one unit; missing components count as zero.
pub fn product_cost(bom: &[BomLine], components: &LookupMap<Uuid, Component>) -> f64 {
    bom.iter()
        .filter_map(|line| {
            components
                .get(&line.component_id)
                .map(|c| f64::from(line.quantity) * c.unit_cost)
        })
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub product: Product,
    pub bom_lines: usize,
    pub cost: f64,
    pub margin: f64,
    pub buildable: Option<i32>,
}

pub fn product_summaries(
    products: &[Product],
    boms: &HashMap<Uuid, Vec<BomLine>>,
    components: &LookupMap<Uuid, Component>,
) -> Vec<ProductSummary> {
    products
        .iter()
        .map(|product| {
            let bom = boms.get(&product.id).map(Vec::as_slice).unwrap_or(&[]);
            let cost = product_cost(bom, components);
            ProductSummary {
                product: product.clone(),
                bom_lines: bom.len(),
                cost,
                margin: product.price - cost,
                buildable: buildable_units(bom, components),
            }
        })
        .collect()
}

impl Searchable for ProductSummary {
    fn search_fields(&self) -> Vec<&str> {
        self.product.search_fields()
    }
}

/// Next lifecycle step of a batch, if any.
pub fn next_batch_status(status: &str) -> Option<&'static str> {
    let index = BATCH_STATUSES.iter().position(|s| *s == status)?;
    BATCH_STATUSES.get(index + 1).copied()
}

pub fn batch_status_color(status: &str) -> &'static str {
    match status {
        "in-transit" => "blue",
        "processing" => "yellow",
        "completed" => "green",
        _ => "gray",
    }
}

pub fn batch_is_locked(batch: &BatchDetail) -> bool {
    batch.batch.status == "completed"
}

pub fn batch_units(batch: &BatchDetail) -> i64 {
    batch.items.iter().map(|item| i64::from(item.quantity)).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventoryTiles {
    pub components: usize,
    pub low_stock: usize,
    pub stock_value: f64,
    pub products: usize,
    pub suppliers: usize,
    pub open_batches: usize,
}

pub fn inventory_tiles(
    components: &[Component],
    products: &[Product],
    suppliers: &[Supplier],
    batches: &[BatchDetail],
) -> InventoryTiles {
    InventoryTiles {
        components: components.len(),
        low_stock: components.iter().filter(|c| is_low_stock(c)).count(),
        stock_value: stock_value(components),
        products: products.len(),
        suppliers: suppliers.len(),
        open_batches: batches.iter().filter(|b| !batch_is_locked(b)).count(),
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_uuid(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

fn parse_count(value: &str, field: &str) -> Result<i32, String> {
    let parsed: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a whole number", field))?;
    if parsed < 0 {
        return Err(format!("{} cannot be negative", field));
    }
    Ok(parsed)
}

fn parse_amount(value: &str, field: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a number", field))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(format!("{} cannot be negative", field));
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFormState {
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl SupplierFormState {
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            name: supplier.name.clone(),
            contact_name: supplier.contact_name.clone().unwrap_or_default(),
            email: supplier.email.clone().unwrap_or_default(),
            phone: supplier.phone.clone().unwrap_or_default(),
            address: supplier.address.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<SupplierPayload, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        Ok(SupplierPayload {
            name: self.name.trim().to_string(),
            contact_name: optional(&self.contact_name),
            email: optional(&self.email),
            phone: optional(&self.phone),
            address: optional(&self.address),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFormState {
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub stock_quantity: String,
    pub reorder_level: String,
    pub unit_cost: String,
    pub supplier_id: String,
    pub image_url: String,
}

impl Default for ComponentFormState {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            unit: "pcs".into(),
            stock_quantity: "0".into(),
            reorder_level: "0".into(),
            unit_cost: "0".into(),
            supplier_id: String::new(),
            image_url: String::new(),
        }
    }
}

impl ComponentFormState {
    pub fn from_component(component: &Component) -> Self {
        Self {
            sku: component.sku.clone(),
            name: component.name.clone(),
            unit: component.unit.clone(),
            stock_quantity: component.stock_quantity.to_string(),
            reorder_level: component.reorder_level.to_string(),
            unit_cost: component.unit_cost.to_string(),
            supplier_id: component.supplier_id.map(|id| id.to_string()).unwrap_or_default(),
            image_url: component.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<ComponentPayload, String> {
        if self.sku.trim().is_empty() || self.name.trim().is_empty() {
            return Err("SKU and name are required".into());
        }
        Ok(ComponentPayload {
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            unit: optional(&self.unit).unwrap_or_else(|| "pcs".into()),
            stock_quantity: parse_count(&self.stock_quantity, "Stock")?,
            reorder_level: parse_count(&self.reorder_level, "Reorder level")?,
            unit_cost: parse_amount(&self.unit_cost, "Unit cost")?,
            supplier_id: parse_uuid(&self.supplier_id),
            image_url: optional(&self.image_url),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormState {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

impl Default for ProductFormState {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            description: String::new(),
            price: "0".into(),
            image_url: String::new(),
        }
    }
}

impl ProductFormState {
    pub fn from_product(product: &Product) -> Self {
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<ProductPayload, String> {
        if self.sku.trim().is_empty() || self.name.trim().is_empty() {
            return Err("SKU and name are required".into());
        }
        Ok(ProductPayload {
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            price: parse_amount(&self.price, "Price")?,
            image_url: optional(&self.image_url),
        })
    }
}

/// Editable `component + quantity` row used by the BOM editor and the
/// batch form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    pub component_id: String,
    pub quantity: String,
}

impl Default for LineDraft {
    fn default() -> Self {
        Self {
            component_id: String::new(),
            quantity: "1".into(),
        }
    }
}

/// Validates draft lines: every line names a component, quantities are
/// positive and no component appears twice.
fn parse_lines(lines: &[LineDraft]) -> Result<Vec<(Uuid, i32)>, String> {
    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let row = index + 1;
        let component_id =
            parse_uuid(&line.component_id).ok_or_else(|| format!("Line {}: choose a component", row))?;
        let quantity: i32 = line
            .quantity
            .trim()
            .parse()
            .map_err(|_| format!("Line {}: quantity must be a whole number", row))?;
        if quantity <= 0 {
            return Err(format!("Line {}: quantity must be greater than zero", row));
        }
        if !seen.insert(component_id) {
            return Err(format!("Line {}: component is listed twice", row));
        }
        parsed.push((component_id, quantity));
    }
    Ok(parsed)
}

pub fn bom_drafts(lines: &[BomLine]) -> Vec<LineDraft> {
    lines
        .iter()
        .map(|line| LineDraft {
            component_id: line.component_id.to_string(),
            quantity: line.quantity.to_string(),
        })
        .collect()
}

pub fn bom_payload(lines: &[LineDraft]) -> Result<Vec<BomLinePayload>, String> {
    Ok(parse_lines(lines)?
        .into_iter()
        .map(|(component_id, quantity)| BomLinePayload {
            component_id,
            quantity,
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchFormState {
    pub batch_code: String,
    pub supplier_id: String,
    pub expected_date: String,
    pub notes: String,
    pub items: Vec<LineDraft>,
}

impl BatchFormState {
    pub fn from_batch(detail: &BatchDetail) -> Self {
        Self {
            batch_code: detail.batch.batch_code.clone(),
            supplier_id: detail.batch.supplier_id.to_string(),
            expected_date: detail
                .batch
                .expected_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            notes: detail.batch.notes.clone().unwrap_or_default(),
            items: detail
                .items
                .iter()
                .map(|item| LineDraft {
                    component_id: item.component_id.to_string(),
                    quantity: item.quantity.to_string(),
                })
                .collect(),
        }
    }

    pub fn to_payload(&self) -> Result<BatchPayload, String> {
        if self.batch_code.trim().is_empty() {
            return Err("Batch code is required".into());
        }
        let supplier_id = parse_uuid(&self.supplier_id).ok_or_else(|| "Select a supplier".to_string())?;
        let items = parse_lines(&self.items)?;
        if items.is_empty() {
            return Err("Add at least one item".into());
        }
        Ok(BatchPayload {
            batch_code: self.batch_code.trim().to_string(),
            supplier_id: Some(supplier_id),
            expected_date: parse_date_input(&self.expected_date)?,
            notes: optional(&self.notes),
            items: items
                .into_iter()
                .map(|(component_id, quantity)| BatchItem {
                    component_id,
                    quantity,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{component, id, product, supplier};
    use crate::utils::table::filter_by_search;

    fn line(product: u128, component: u128, quantity: i32) -> BomLine {
        BomLine {
            product_id: id(product),
            component_id: id(component),
            quantity,
        }
    }

    fn stock() -> LookupMap<Uuid, Component> {
        let rows = vec![
            component(1, "BOLT", 10, 2, 0.5),
            component(2, "PLATE", 7, 10, 3.0),
        ];
        LookupMap::build(&rows, |c| c.id)
    }

    #[test]
    fn low_stock_includes_the_reorder_level() {
        assert!(is_low_stock(&component(1, "A", 5, 5, 1.0)));
        assert!(is_low_stock(&component(1, "A", 4, 5, 1.0)));
        assert!(!is_low_stock(&component(1, "A", 6, 5, 1.0)));
    }

    #[test]
    fn stock_value_sums_quantity_times_cost() {
        let rows = vec![component(1, "A", 10, 0, 0.5), component(2, "B", 3, 0, 2.0)];
        assert_eq!(stock_value(&rows), 11.0);
        assert_eq!(stock_value(&[]), 0.0);
    }

    #[test]
    fn buildable_units_takes_the_scarcest_component() {
        let bom = vec![line(50, 1, 3), line(50, 2, 2)];
        assert_eq!(buildable_units(&bom, &stock()), Some(3));
    }

    #[test]
    fn buildable_units_is_zero_when_a_component_is_missing() {
        let bom = vec![line(50, 1, 1), line(50, 99, 1)];
        assert_eq!(buildable_units(&bom, &stock()), Some(0));
    }

    #[test]
    fn buildable_units_is_none_without_a_bom() {
        assert_eq!(buildable_units(&[], &stock()), None);
    }

    #[test]
    fn product_summary_reports_cost_and_margin() {
        let boms = bom_by_product(&[line(50, 1, 4), line(50, 2, 1)]);
        let rows = product_summaries(&[product(50, "KIT", 10.0), product(51, "LOOSE", 4.0)], &boms, &stock());
        assert_eq!(rows[0].cost, 5.0);
        assert_eq!(rows[0].margin, 5.0);
        assert_eq!(rows[0].bom_lines, 2);
        assert_eq!(rows[0].buildable, Some(2));
        assert_eq!(rows[1].cost, 0.0);
        assert_eq!(rows[1].buildable, None);
    }

    #[test]
    fn batches_move_one_step_forward() {
        assert_eq!(next_batch_status("in-transit"), Some("processing"));
        assert_eq!(next_batch_status("processing"), Some("completed"));
        assert_eq!(next_batch_status("completed"), None);
        assert_eq!(next_batch_status("lost"), None);
    }

    #[test]
    fn supplier_search_covers_contact_and_email() {
        let mut acme = supplier(1, "Acme Parts");
        acme.contact_name = Some("Jane Roe".into());
        acme.email = Some("sales@acme.test".into());
        let rows = vec![acme, supplier(2, "Globex")];
        assert_eq!(filter_by_search(&rows, "roe").len(), 1);
        assert_eq!(filter_by_search(&rows, "ACME.TEST").len(), 1);
        assert_eq!(filter_by_search(&rows, "  ").len(), 2);
    }

    #[test]
    fn component_search_matches_sku() {
        let rows = vec![component(1, "BOLT-M4", 1, 0, 1.0), component(2, "NUT-M4", 1, 0, 1.0)];
        let found = filter_by_search(&rows, "bolt");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "BOLT-M4");
    }

    #[test]
    fn bom_payload_rejects_duplicates_and_non_positive_quantities() {
        let a = id(1).to_string();
        let duplicate = vec![
            LineDraft { component_id: a.clone(), quantity: "1".into() },
            LineDraft { component_id: a.clone(), quantity: "2".into() },
        ];
        assert_eq!(bom_payload(&duplicate).unwrap_err(), "Line 2: component is listed twice");

        let zero = vec![LineDraft { component_id: a.clone(), quantity: "0".into() }];
        assert!(bom_payload(&zero).is_err());

        let ok = vec![LineDraft { component_id: a, quantity: " 3 ".into() }];
        assert_eq!(bom_payload(&ok).unwrap()[0].quantity, 3);
        assert!(bom_payload(&[]).unwrap().is_empty());
    }

    #[test]
    fn batch_form_requires_supplier_and_items() {
        let mut form = BatchFormState {
            batch_code: "B-001".into(),
            ..BatchFormState::default()
        };
        assert_eq!(form.to_payload().unwrap_err(), "Select a supplier");
        form.supplier_id = id(7).to_string();
        assert_eq!(form.to_payload().unwrap_err(), "Add at least one item");
        form.items.push(LineDraft {
            component_id: id(1).to_string(),
            quantity: "12".into(),
        });
        form.expected_date = "2025-03-10".into();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.supplier_id, Some(id(7)));
        assert_eq!(payload.items[0].quantity, 12);
        assert!(payload.expected_date.is_some());
    }

    #[test]
    fn component_form_parses_numbers() {
        let mut form = ComponentFormState {
            sku: "BOLT".into(),
            name: "Bolt".into(),
            stock_quantity: "-1".into(),
            ..ComponentFormState::default()
        };
        assert_eq!(form.to_payload().unwrap_err(), "Stock cannot be negative");
        form.stock_quantity = "12".into();
        form.unit_cost = "0.25".into();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.stock_quantity, 12);
        assert_eq!(payload.unit_cost, 0.25);
        assert_eq!(payload.supplier_id, None);
    }
}

//! In-memory data store seeded with the demo dataset
//!
//! The app runs entirely against this store; there is no database or
//! network behind it. Dashboard figures are derived from the raw
//! collections on demand so they can never drift from the data.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{
    BomLine, InventorySummary, Material, Order, OrderItem, OrderStatus, OrderSummary, Priority,
    Product, StockAlert, Transaction, TransactionKind,
};

pub struct Store {
    materials: Vec<Material>,
    products: Vec<Product>,
    orders: Vec<Order>,
    transactions: Vec<Transaction>,
}

impl Store {
    pub fn new(
        materials: Vec<Material>,
        products: Vec<Product>,
        orders: Vec<Order>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            materials,
            products,
            orders,
            transactions,
        }
    }

    /// Build a store populated with the demo dataset
    pub fn with_mock_data() -> Self {
        Self::new(
            mock_materials(),
            mock_products(),
            mock_orders(),
            mock_transactions(),
        )
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Case-insensitive substring match on material name or code.
    /// A blank query returns the full collection.
    pub fn search_materials(&self, query: &str) -> Vec<Material> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.materials.clone();
        }
        self.materials
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&query) || m.code.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match on customer name, customer code,
    /// or order id, optionally narrowed to one status.
    pub fn search_orders(&self, query: &str, status: Option<OrderStatus>) -> Vec<Order> {
        let query = query.trim().to_lowercase();
        self.orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .filter(|o| {
                query.is_empty()
                    || o.customer_name.to_lowercase().contains(&query)
                    || o.customer_code.to_lowercase().contains(&query)
                    || o.id.contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Every material at or below its reorder threshold, in input order
    pub fn stock_alerts(&self) -> Vec<StockAlert> {
        self.materials
            .iter()
            .filter(|m| m.is_low_stock())
            .map(|m| StockAlert {
                material_id: m.id.clone(),
                material_name: m.name.clone(),
                current_stock: m.stock,
                threshold: m.threshold,
                percent_remaining: m.percent_of_threshold(),
            })
            .collect()
    }

    pub fn inventory_summary(&self) -> InventorySummary {
        InventorySummary {
            total_items: self.materials.len(),
            items_in_stock: self
                .materials
                .iter()
                .filter(|m| !m.is_out_of_stock())
                .count(),
            low_stock_items: self.materials.iter().filter(|m| m.is_low_stock()).count(),
            out_of_stock_items: self
                .materials
                .iter()
                .filter(|m| m.is_out_of_stock())
                .count(),
            total_value: self
                .materials
                .iter()
                .map(|m| m.stock as f64 * m.unit_price)
                .sum(),
        }
    }

    /// Order counts by status; lateness is judged against the supplied date
    pub fn order_summary(&self, today: NaiveDate) -> OrderSummary {
        let count = |s: OrderStatus| self.orders.iter().filter(|o| o.status == s).count();
        OrderSummary {
            pending: count(OrderStatus::Pending),
            processing: count(OrderStatus::Processing),
            completed: count(OrderStatus::Completed),
            total: self.orders.len(),
            late_orders: self.orders.iter().filter(|o| o.is_late(today)).count(),
        }
    }

    /// Most recent stock movements first
    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        let mut txs = self.transactions.clone();
        txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        txs.truncate(limit);
        txs
    }

    /// Serialize the full dataset as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Export<'a> {
            materials: &'a [Material],
            products: &'a [Product],
            orders: &'a [Order],
            transactions: &'a [Transaction],
        }
        let json = serde_json::to_string_pretty(&Export {
            materials: &self.materials,
            products: &self.products,
            orders: &self.orders,
            transactions: &self.transactions,
        })?;
        Ok(json)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid mock date")
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d)
        .and_hms_opt(h, min, s)
        .expect("valid mock time")
}

fn mock_materials() -> Vec<Material> {
    vec![
        Material {
            id: "1".into(),
            name: "Aluminum Sheet 1mm".into(),
            code: "AS-001".into(),
            stock: 250,
            lead_time_days: 7,
            average_usage: 35,
            location: Some("Warehouse A, Shelf 3".into()),
            supplier: Some("MetalWorks Inc.".into()),
            threshold: 100,
            unit_of_measure: "sheet".into(),
            unit_price: 25.50,
        },
        Material {
            id: "2".into(),
            name: "Steel Rod 10mm".into(),
            code: "SR-010".into(),
            stock: 80,
            lead_time_days: 14,
            average_usage: 12,
            location: Some("Warehouse B, Shelf 1".into()),
            supplier: Some("SteelMasters Ltd.".into()),
            threshold: 30,
            unit_of_measure: "rod".into(),
            unit_price: 18.75,
        },
        Material {
            id: "3".into(),
            name: "Copper Wire 2mm".into(),
            code: "CW-002".into(),
            stock: 15,
            lead_time_days: 10,
            average_usage: 5,
            location: Some("Warehouse A, Shelf 7".into()),
            supplier: Some("ElectroWire Co.".into()),
            threshold: 25,
            unit_of_measure: "spool".into(),
            unit_price: 42.00,
        },
        Material {
            id: "4".into(),
            name: "Plastic Connector Type A".into(),
            code: "PC-A01".into(),
            stock: 420,
            lead_time_days: 5,
            average_usage: 60,
            location: Some("Warehouse C, Bin 12".into()),
            supplier: Some("PlastiCorp".into()),
            threshold: 200,
            unit_of_measure: "piece".into(),
            unit_price: 0.85,
        },
        Material {
            id: "5".into(),
            name: "LED Light 5W".into(),
            code: "LED-5W".into(),
            stock: 50,
            lead_time_days: 21,
            average_usage: 30,
            location: Some("Warehouse B, Shelf 5".into()),
            supplier: Some("BrightTech Electronics".into()),
            threshold: 100,
            unit_of_measure: "piece".into(),
            unit_price: 3.25,
        },
    ]
}

fn mock_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Metal Frame Assembly".into(),
            code: "MFA-100".into(),
            materials: vec![
                BomLine {
                    material_id: "1".into(),
                    quantity: 2,
                },
                BomLine {
                    material_id: "2".into(),
                    quantity: 4,
                },
            ],
            lead_time_days: 3,
            procedure: Some(
                "1. Cut aluminum sheets\n2. Bend to form\n3. Assemble with steel rods".into(),
            ),
        },
        Product {
            id: "2".into(),
            name: "Electronic Control Unit".into(),
            code: "ECU-200".into(),
            materials: vec![
                BomLine {
                    material_id: "3".into(),
                    quantity: 1,
                },
                BomLine {
                    material_id: "4".into(),
                    quantity: 8,
                },
                BomLine {
                    material_id: "5".into(),
                    quantity: 4,
                },
            ],
            lead_time_days: 5,
            procedure: Some(
                "1. Assemble PCB\n2. Connect wiring\n3. Install LEDs\n4. Test functionality".into(),
            ),
        },
        Product {
            id: "3".into(),
            name: "Complete System".into(),
            code: "CS-300".into(),
            materials: vec![
                BomLine {
                    material_id: "1".into(),
                    quantity: 2,
                },
                BomLine {
                    material_id: "2".into(),
                    quantity: 4,
                },
                BomLine {
                    material_id: "3".into(),
                    quantity: 1,
                },
                BomLine {
                    material_id: "4".into(),
                    quantity: 10,
                },
                BomLine {
                    material_id: "5".into(),
                    quantity: 6,
                },
            ],
            lead_time_days: 7,
            procedure: None,
        },
    ]
}

fn mock_orders() -> Vec<Order> {
    vec![
        Order {
            id: "1".into(),
            customer_name: "TechSolutions Inc.".into(),
            customer_code: "TSI-001".into(),
            items: vec![OrderItem {
                product_id: "1".into(),
                quantity: 5,
                product_name: "Metal Frame Assembly".into(),
                product_code: "MFA-100".into(),
            }],
            priority: Priority::High,
            due_date: date(2025, 3, 15),
            status: OrderStatus::Processing,
            created_at: date(2025, 2, 28),
            updated_at: date(2025, 3, 1),
        },
        Order {
            id: "2".into(),
            customer_name: "Electronics Partners".into(),
            customer_code: "EP-002".into(),
            items: vec![OrderItem {
                product_id: "2".into(),
                quantity: 10,
                product_name: "Electronic Control Unit".into(),
                product_code: "ECU-200".into(),
            }],
            priority: Priority::Medium,
            due_date: date(2025, 3, 20),
            status: OrderStatus::Pending,
            created_at: date(2025, 3, 2),
            updated_at: date(2025, 3, 2),
        },
        Order {
            id: "3".into(),
            customer_name: "Global Systems Ltd.".into(),
            customer_code: "GSL-003".into(),
            items: vec![OrderItem {
                product_id: "3".into(),
                quantity: 2,
                product_name: "Complete System".into(),
                product_code: "CS-300".into(),
            }],
            priority: Priority::Low,
            due_date: date(2025, 4, 10),
            status: OrderStatus::Pending,
            created_at: date(2025, 3, 5),
            updated_at: date(2025, 3, 5),
        },
        Order {
            id: "4".into(),
            customer_name: "Industrial Solutions".into(),
            customer_code: "IS-004".into(),
            items: vec![
                OrderItem {
                    product_id: "1".into(),
                    quantity: 8,
                    product_name: "Metal Frame Assembly".into(),
                    product_code: "MFA-100".into(),
                },
                OrderItem {
                    product_id: "2".into(),
                    quantity: 4,
                    product_name: "Electronic Control Unit".into(),
                    product_code: "ECU-200".into(),
                },
            ],
            priority: Priority::High,
            due_date: date(2025, 3, 12),
            status: OrderStatus::Processing,
            created_at: date(2025, 2, 25),
            updated_at: date(2025, 2, 27),
        },
        Order {
            id: "5".into(),
            customer_name: "MegaTech Corp".into(),
            customer_code: "MTC-005".into(),
            items: vec![OrderItem {
                product_id: "3".into(),
                quantity: 1,
                product_name: "Complete System".into(),
                product_code: "CS-300".into(),
            }],
            priority: Priority::Medium,
            due_date: date(2025, 3, 25),
            status: OrderStatus::Completed,
            created_at: date(2025, 2, 20),
            updated_at: date(2025, 3, 3),
        },
    ]
}

fn mock_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "1".into(),
            kind: TransactionKind::Inbound,
            material_id: "1".into(),
            material_name: "Aluminum Sheet 1mm".into(),
            quantity: 50,
            timestamp: datetime(2025, 2, 28, 10, 23, 15),
            order_id: None,
            notes: Some("Regular supply delivery".into()),
        },
        Transaction {
            id: "2".into(),
            kind: TransactionKind::Outbound,
            material_id: "1".into(),
            material_name: "Aluminum Sheet 1mm".into(),
            quantity: 10,
            timestamp: datetime(2025, 3, 1, 9, 15, 45),
            order_id: Some("1".into()),
            notes: Some("Used for order #1".into()),
        },
        Transaction {
            id: "3".into(),
            kind: TransactionKind::Inbound,
            material_id: "3".into(),
            material_name: "Copper Wire 2mm".into(),
            quantity: 5,
            timestamp: datetime(2025, 3, 2, 14, 30, 22),
            order_id: None,
            notes: Some("Emergency order due to low stock".into()),
        },
        Transaction {
            id: "4".into(),
            kind: TransactionKind::Outbound,
            material_id: "5".into(),
            material_name: "LED Light 5W".into(),
            quantity: 24,
            timestamp: datetime(2025, 3, 3, 11, 45, 10),
            order_id: Some("2".into()),
            notes: Some("Used for order #2".into()),
        },
        Transaction {
            id: "5".into(),
            kind: TransactionKind::Outbound,
            material_id: "4".into(),
            material_name: "Plastic Connector Type A".into(),
            quantity: 40,
            timestamp: datetime(2025, 3, 4, 16, 20, 5),
            order_id: Some("2".into()),
            notes: Some("Used for order #2".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_materials_by_name_and_code() {
        let store = Store::with_mock_data();

        let by_name = store.search_materials("copper");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].code, "CW-002");

        let by_code = store.search_materials("as-0");
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "Aluminum Sheet 1mm");

        assert_eq!(store.search_materials("   ").len(), 5);
        assert!(store.search_materials("titanium").is_empty());
    }

    #[test]
    fn test_search_orders_query_and_status() {
        let store = Store::with_mock_data();

        let by_customer = store.search_orders("tech", None);
        assert_eq!(by_customer.len(), 2); // TechSolutions + MegaTech

        let by_code = store.search_orders("EP-002", None);
        assert_eq!(by_code.len(), 1);

        let pending = store.search_orders("", Some(OrderStatus::Pending));
        assert_eq!(pending.len(), 2);

        let pending_tech = store.search_orders("tech", Some(OrderStatus::Pending));
        assert!(pending_tech.is_empty());
    }

    #[test]
    fn test_stock_alerts_derived_from_thresholds() {
        let store = Store::with_mock_data();
        let alerts = store.stock_alerts();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].material_name, "Copper Wire 2mm");
        assert_eq!(alerts[0].percent_remaining, 60);
        assert_eq!(alerts[1].material_name, "LED Light 5W");
        assert_eq!(alerts[1].percent_remaining, 50);
    }

    #[test]
    fn test_inventory_summary() {
        let store = Store::with_mock_data();
        let summary = store.inventory_summary();

        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.items_in_stock, 5);
        assert_eq!(summary.low_stock_items, 2);
        assert_eq!(summary.out_of_stock_items, 0);
        assert!((summary.total_value - 9024.50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_summary_counts_and_lateness() {
        let store = Store::with_mock_data();

        let on_time = store.order_summary(date(2025, 3, 10));
        assert_eq!(on_time.pending, 2);
        assert_eq!(on_time.processing, 2);
        assert_eq!(on_time.completed, 1);
        assert_eq!(on_time.total, 5);
        assert_eq!(on_time.late_orders, 0);

        // Orders 1 and 4 are past due and still processing by the 16th
        let later = store.order_summary(date(2025, 3, 16));
        assert_eq!(later.late_orders, 2);
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let store = Store::with_mock_data();
        let recent = store.recent_transactions(3);

        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].id, "5");
        assert_eq!(recent[1].id, "4");
        assert_eq!(recent[2].id, "3");
    }

    #[test]
    fn test_export_json_round_trips() {
        let store = Store::with_mock_data();
        let json = store.export_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["materials"].as_array().unwrap().len(), 5);
        assert_eq!(value["products"].as_array().unwrap().len(), 3);
        assert_eq!(value["orders"].as_array().unwrap().len(), 5);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_export_json_writes_to_disk() {
        let store = Store::with_mock_data();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        std::fs::write(&path, store.export_json().unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Aluminum Sheet 1mm"));
        assert!(content.contains("TechSolutions Inc."));
    }
}

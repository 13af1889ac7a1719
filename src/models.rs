use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A raw material tracked in the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub code: String,
    pub stock: u32,
    /// Supplier lead time in days
    pub lead_time_days: u32,
    /// Average units consumed per week
    pub average_usage: u32,
    pub location: Option<String>,
    pub supplier: Option<String>,
    /// Reorder threshold; stock at or below this level raises an alert
    pub threshold: u32,
    pub unit_of_measure: String,
    pub unit_price: f64,
}

impl Material {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.threshold
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Current stock as a percentage of the reorder threshold
    pub fn percent_of_threshold(&self) -> u32 {
        if self.threshold == 0 {
            return 100;
        }
        (self.stock as f64 / self.threshold as f64 * 100.0).round() as u32
    }
}

/// A sellable product assembled from materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    pub materials: Vec<BomLine>,
    pub lead_time_days: u32,
    pub procedure: Option<String>,
}

/// One bill-of-materials line: how much of a material a product consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLine {
    pub material_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_code: String,
    pub items: Vec<OrderItem>,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub status: OrderStatus,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl Order {
    /// An order is late when its due date has passed and it is still open
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.status.is_open()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    pub product_name: String,
    pub product_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Open orders still count toward lateness
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// A stock movement in or out of the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub material_id: String,
    pub material_name: String,
    pub quantity: u32,
    pub timestamp: NaiveDateTime,
    pub order_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Inbound,
    Outbound,
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Inbound => "Inbound",
            TransactionKind::Outbound => "Outbound",
        }
    }
}

/// A material whose stock has fallen to or below its reorder threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAlert {
    pub material_id: String,
    pub material_name: String,
    pub current_stock: u32,
    pub threshold: u32,
    pub percent_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub items_in_stock: usize,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub total: usize,
    pub late_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

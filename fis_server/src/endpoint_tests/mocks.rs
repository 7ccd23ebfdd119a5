use fis_engine::{
    db_types::{InsertOrderResult, Message, NewMessage, NewOrder, Order, OrderId, OrderStatusType},
    order_objects::OrderWithChat,
    traits::{StorefrontApiError, StorefrontDatabase},
};
use mockall::mock;

mock! {
    pub StorefrontDb {}
    impl StorefrontDatabase for StorefrontDb {
        async fn insert_order(&self, order: NewOrder) -> Result<InsertOrderResult, StorefrontApiError>;
        async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError>;
        async fn fetch_orders(&self) -> Result<Vec<OrderWithChat>, StorefrontApiError>;
        async fn update_order_status<'a>(&self, order_id: &OrderId, status: OrderStatusType, payment_ref: Option<&'a str>) -> Result<Option<Order>, StorefrontApiError>;
        async fn fetch_messages_for_order(&self, order_id: &OrderId) -> Result<Vec<Message>, StorefrontApiError>;
        async fn insert_message(&self, message: NewMessage) -> Result<Message, StorefrontApiError>;
    }
}

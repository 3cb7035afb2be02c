use crate::flow::PurchaseFlow;

#[derive(Clone)]
pub struct AppState {
    pub flow: PurchaseFlow,
}

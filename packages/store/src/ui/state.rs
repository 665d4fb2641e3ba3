//! Server state.

use crate::usecase::StoreUseCases;

/// Shared application state
pub struct AppState {
    /// ストアのユースケース
    pub usecases: StoreUseCases,
}

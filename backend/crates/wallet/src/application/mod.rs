pub mod checkout;
pub mod config;
pub mod get_balance;
pub mod get_history;
pub mod payment_callback;
pub mod top_up;

pub use checkout::{CheckoutInput, CheckoutOutput, CheckoutUseCase};
pub use get_balance::GetBalanceUseCase;
pub use get_history::GetHistoryUseCase;
pub use payment_callback::{PaymentCallbackInput, PaymentCallbackUseCase};
pub use top_up::{TopUpInput, TopUpUseCase};

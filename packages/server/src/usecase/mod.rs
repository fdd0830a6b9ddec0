//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層と接続レジストリを操作します。

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod fan_out;
pub mod send_message;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ReplayError, SendMessageError};
pub use fan_out::{BroadcastQueue, BroadcastReceiver, DispatchReport, FanOutDispatcher};
pub use send_message::{SendMessageUseCase, SendOutcome};

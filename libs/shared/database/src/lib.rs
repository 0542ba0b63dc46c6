pub mod ack;
pub mod error;
pub mod query;
pub mod state;
pub mod supabase;

pub use ack::{DeleteAck, InsertAck, UpdateAck};
pub use error::StoreError;
pub use query::Query;
pub use state::AppState;
pub use supabase::SupabaseClient;

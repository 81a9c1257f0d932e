// Re-export all model types
pub use self::enums::*;
pub use self::errors::*;
pub use self::order::*;
pub use self::payment::*;
pub use self::product::*;
pub use self::resource::*;
pub use self::validation::*;
pub use self::user::*;

mod enums;
mod errors;
mod order;
mod payment;
mod product;
mod resource;
mod user;
mod validation;

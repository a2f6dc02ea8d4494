pub mod order;
mod route;
pub mod user;
pub mod util;
pub use order::order_route;
pub use route::main_route;
pub use user::user_route;
pub use util::util_route;

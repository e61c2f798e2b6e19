mod as_value;
mod cond;
mod dialect;
mod encode;
mod error;
mod executor;
mod record;
mod resolver;
mod scanner;
mod sink;
mod sqler;
mod template;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use cond::*;
pub use dialect::*;
pub use encode::*;
pub use error::*;
pub use executor::*;
pub use record::*;
pub use resolver::*;
pub use scanner::*;
pub use sink::*;
pub use sqler::*;
pub use template::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

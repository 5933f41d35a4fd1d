//! 解析モジュール
//!
//! このモジュールは名前解決、具体型タプルの解析、
//! プレースホルダー型による単相化を行います。

pub mod instances;
pub mod monomorphization;
pub mod placeholder_set;
pub mod resolver;

// 公開API
pub use instances::{Instances, TypeTuple};
pub use monomorphization::{monomorphize_source, Monomorphizer};
pub use placeholder_set::PlaceholderSet;
pub use resolver::{resolve_file, Resolver};

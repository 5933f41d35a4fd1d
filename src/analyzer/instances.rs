//! 具体型タプルの指定の解析
//!
//! `string,int32;string,int64` のように、インスタンスを `;` で、
//! インスタンス内の型を `,` で区切る。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InstanceError;

/// プレースホルダーに順に割り当てる具体型の並び
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTuple(Vec<String>);

impl TypeTuple {
    pub fn new(types: Vec<String>) -> Self {
        Self(types)
    }

    pub fn types(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TypeTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// 生成するインスタンスの一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instances {
    tuples: Vec<TypeTuple>,
}

impl Instances {
    /// 指定文字列を解析
    pub fn parse(spec: &str) -> Result<Self, InstanceError> {
        let mut tuples: Vec<TypeTuple> = Vec::new();

        for (index, instance) in spec.split(';').enumerate() {
            let mut types = Vec::new();
            for token in instance.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    return Err(InstanceError::EmptyType);
                }
                types.push(token.to_string());
            }

            if types.is_empty() {
                return Err(InstanceError::NoTypes);
            }
            if let Some(first) = tuples.first() {
                if first.len() != types.len() {
                    return Err(InstanceError::ArityMismatch {
                        expected: first.len(),
                        found: types.len(),
                        instance: index + 1,
                    });
                }
            }

            tuples.push(TypeTuple(types));
        }

        Ok(Self { tuples })
    }

    pub fn tuples(&self) -> &[TypeTuple] {
        &self.tuples
    }

    /// 1インスタンスあたりの型の数
    pub fn arity(&self) -> usize {
        self.tuples.first().map(TypeTuple::len).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeTuple> {
        self.tuples.iter()
    }
}

impl FromStr for Instances {
    type Err = InstanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Instances {
    type Item = &'a TypeTuple;
    type IntoIter = std::slice::Iter<'a, TypeTuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

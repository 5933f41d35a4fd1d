//! 具体型指定の解析テスト

use monogen::analyzer::{Instances, TypeTuple};
use monogen::error::InstanceError;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn types(instances: &Instances) -> Vec<Vec<&str>> {
    instances
        .iter()
        .map(|tuple| tuple.types().iter().map(String::as_str).collect())
        .collect()
}

#[test]
fn test_single_type() {
    let instances = Instances::parse("int").unwrap();
    assert_eq!(types(&instances), vec![vec!["int"]]);
    assert_eq!(instances.arity(), 1);
}

#[test]
fn test_two_instances() {
    let instances = Instances::parse("int32;int64").unwrap();
    assert_eq!(types(&instances), vec![vec!["int32"], vec!["int64"]]);
    assert_eq!(instances.len(), 2);
}

#[test]
fn test_whitespace_is_trimmed() {
    let instances: Instances = " string , *big.Int ; string,map[string]int ".parse().unwrap();
    assert_eq!(
        types(&instances),
        vec![vec!["string", "*big.Int"], vec!["string", "map[string]int"]]
    );
    assert_eq!(instances.arity(), 2);
}

#[test]
fn test_pointer_type() {
    assert!(Instances::parse("string,*int32").is_ok());
}

#[test_case("int32;"; "trailing empty instance")]
#[test_case("string,int32;string, "; "blank type")]
#[test_case(""; "empty input")]
#[test_case("int,,int"; "empty type in the middle")]
fn test_empty_type(spec: &str) {
    assert_eq!(Instances::parse(spec), Err(InstanceError::EmptyType));
}

#[test]
fn test_not_same_size() {
    assert_eq!(
        Instances::parse("string,int32;string"),
        Err(InstanceError::ArityMismatch {
            expected: 2,
            found: 1,
            instance: 2,
        })
    );
}

#[test]
fn test_tuple_display() {
    let tuple = TypeTuple::new(vec!["string".into(), "int32".into()]);
    assert_eq!(tuple.to_string(), "(string, int32)");
    assert_eq!(tuple.get(1), Some("int32"));
    assert_eq!(tuple.get(2), None);
}

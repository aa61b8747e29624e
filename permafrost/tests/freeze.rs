// Copyright 2018 The Starlark in Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Freezing values end to end.

#[macro_use]
mod testutil;

use permafrost::freeze::{classify, Classification, FrozenHandle};
use permafrost::values::bytes::Bytes;
use permafrost::values::dict::{Dict, FrozenDict, FrozenOrderedDict, OrderedDict};
use permafrost::values::float::Complex;
use permafrost::values::function::{Arguments, Function};
use permafrost::values::list::List;
use permafrost::values::set::{FrozenSet, Set};
use permafrost::{freeze, is_immutable, Value};
use testutil::{Person, Timestamp};

fn args(values: Vec<Value>) -> Arguments {
    Arguments::new(values)
}

#[test]
fn native_immutables_are_not_wrapped() {
    let add = Function::new("add", |args| {
        Ok(Value::from(
            args.required(0, "x")?.to_int()? + args.required(1, "y")?.to_int()?,
        ))
    });
    for v in vec![
        Value::from(0),
        Value::from(1.5),
        Complex::new(1.0, 1.0),
        Value::from("a"),
        Value::new(Bytes(b"a".to_vec())),
        Value::from((1, 2, 3)),
        FrozenSet::new(vec![1, 2, 3]).unwrap(),
        add,
    ] {
        let frozen = freeze(&v).unwrap();
        assert_eq!(v.get_type(), frozen.get_type());
        assert!(frozen == v, "{:?}", v);
        if !v.get_type().starts_with("int") {
            assert!(frozen.ptr_eq(&v), "{:?}", v);
        }
        assert!(is_immutable(&frozen));
    }
}

#[test]
fn read_only_method_through_handle() {
    let t = Timestamp::new(1_000, "local");
    let frozen = freeze(&t).unwrap();
    let replaced = frozen
        .call_method("replace", args(vec![Value::from("utc")]))
        .unwrap();
    assert!(replaced == Timestamp::new(1_000, "utc"));
    assert!(frozen == t);
    assert!(t == Timestamp::new(1_000, "local"));
}

#[test]
fn frozen_list_is_immutable() {
    let collection = freeze(&List::new(vec![1, 2, 3])).unwrap();
    assert_eq!("tuple", collection.get_type());
    assert!(collection
        .call_method("append", args(vec![Value::from(4)]))
        .is_err());
    assert!(collection
        .set_at(Value::from(0), Value::from(4))
        .is_err());
    assert!(collection == Value::from((1, 2, 3)));
}

#[test]
fn frozen_set_is_immutable() {
    let s = Set::new(vec![1, 2, 3]).unwrap();
    let frozen = freeze(&s).unwrap();
    assert_eq!("frozenset", frozen.get_type());
    assert!(frozen == FrozenSet::new(vec![3, 2, 1]).unwrap());
    assert!(frozen == s);
    assert!(frozen.call_method("add", args(vec![Value::from(4)])).is_err());
}

#[test]
fn equal_lists_freeze_to_equal_hashable_tuples() {
    // Distinct but equal lists freeze to tuples with equal hashes.
    let a = List::new(vec![1]);
    let b = List::new(vec![1]);
    let l = List::new(vec![a, b]);
    let frozen = freeze(&l).unwrap();
    let as_set = FrozenSet::new(frozen.iter().unwrap()).unwrap();
    assert_eq!(1, as_set.length().unwrap());
}

#[test]
fn frozen_dict_is_immutable() {
    let d = Dict::<false>::from_pairs(vec![("a", 1), ("b", 2), ("c", 3)]).unwrap();
    let collection = freeze(&d).unwrap();
    let update = collection.call_method(
        "update",
        args(vec![Dict::<false>::from_pairs(vec![("d", 4)]).unwrap()]),
    );
    assert!(update.is_err());
    assert!(collection.set_at(Value::from("d"), Value::from(4)).is_err());
    assert!(collection == Dict::<false>::from_pairs(vec![("a", 1), ("b", 2), ("c", 3)]).unwrap());
    assert!(collection == FrozenDict::<false>::from_pairs(vec![("c", 3), ("b", 2), ("a", 1)]).unwrap());
}

#[test]
fn frozen_ordered_dict_is_immutable() {
    let d = OrderedDict::from_pairs(vec![("a", 1), ("b", 2), ("c", 3)]).unwrap();
    let collection = freeze(&d).unwrap();
    assert_eq!("FrozenOrderedDict", collection.get_type());
    assert!(collection
        .call_method("update", args(vec![Value::from(("d", 4))]))
        .is_err());
    assert!(collection == OrderedDict::from_pairs(vec![("a", 1), ("b", 2), ("c", 3)]).unwrap());
    assert!(collection != OrderedDict::from_pairs(vec![("c", 3), ("b", 2), ("a", 1)]).unwrap());
    assert!(collection == FrozenOrderedDict::from_pairs(vec![("a", 1), ("b", 2), ("c", 3)]).unwrap());
}

#[test]
fn frozen_mappings_equal_their_source() {
    let d = Dict::<false>::from_pairs(vec![("a", List::new(vec![1]))]).unwrap();
    let frozen = freeze(&d).unwrap();
    assert_eq!("frozendict({\"a\": (1,)})", frozen.to_repr());
    assert!(frozen == d);
    assert!(d == frozen);

    let o = OrderedDict::from_pairs(vec![
        ("b", List::new(vec![List::new(vec![1]), Value::from(2)])),
        ("a", List::new(Vec::<Value>::new())),
    ])
    .unwrap();
    let frozen = freeze(&o).unwrap();
    assert_eq!("FrozenOrderedDict({\"b\": ((1,), 2), \"a\": ()})", frozen.to_repr());
    assert!(frozen == o);
    assert!(o == frozen);
}

#[test]
fn frozen_object_is_immutable() {
    let p = freeze(&Person::new("Alice")).unwrap();
    assert!(p.is::<FrozenHandle>());
    assert_eq!("Person", p.get_type());
    assert_eq!("Person(Alice)", p.to_repr());

    assert_freeze_error!(p.set_attr("name", Value::from("Bob")));
    assert_freeze_error!(p.call_method("set_name", args(vec![Value::from("Bob")])));

    assert!(p == Person::new("Alice"));
    assert!(Person::new("Alice") == p);
    assert!(p.get_attr("name").unwrap() == Value::from("Alice"));
}

#[test]
fn frozen_object_error_messages() {
    let p = freeze(&Person::new("Alice")).unwrap();
    assert_eq!(
        "cannot alter attribute `name` of frozen value Person(Alice)",
        p.set_attr("name", Value::from("Bob")).unwrap_err().to_string()
    );
    assert_eq!(
        "call to set_name with arguments (\"Bob\") would mutate Person(Alice)",
        p.call_method("set_name", args(vec![Value::from("Bob")]))
            .unwrap_err()
            .to_string()
    );
}

#[test]
fn attributes_are_frozen_on_read() {
    let person = Person::new("Alice");
    let nicknames = person.get_attr("nicknames").unwrap();
    nicknames
        .call_method("append", args(vec![Value::from("Al")]))
        .unwrap();

    let p = freeze(&person).unwrap();
    let frozen_nicknames = p.get_attr("nicknames").unwrap();
    assert_eq!("(\"Al\",)", frozen_nicknames.to_repr());
    assert!(frozen_nicknames
        .call_method("append", args(vec![Value::from("Ally")]))
        .is_err());

    // Reads are lazy: later changes through other aliases show up.
    nicknames
        .call_method("append", args(vec![Value::from("Ally")]))
        .unwrap();
    assert_eq!("(\"Al\", \"Ally\")", p.get_attr("nicknames").unwrap().to_repr());
}

#[test]
fn mutation_through_contained_values_is_caught() {
    let person = Person::new("Alice");
    let p = freeze(&person).unwrap();
    assert_freeze_error!(p.call_method("add_nickname", args(vec![Value::from("Al")])));
    assert_eq!(0, person.get_attr("nicknames").unwrap().length().unwrap());
    assert!(p
        .call_method("greet", Arguments::none())
        .unwrap()
        == Value::from("Hello, I am Alice"));
}

#[test]
fn freezing_is_idempotent() {
    let p = freeze(&Person::new("Alice")).unwrap();
    let again = freeze(&p).unwrap();
    assert!(again.ptr_eq(&p));
    assert_eq!(Classification::Immutable, classify(&p));

    let t = freeze(&List::new(vec![List::new(vec![1])])).unwrap();
    assert!(freeze(&t).unwrap().ptr_eq(&t));
}

#[test]
fn containers_of_objects() {
    let l = List::new(vec![Person::new("Alice"), Person::new("Bob")]);
    let frozen = freeze(&l).unwrap();
    let alice = frozen.at(Value::from(0)).unwrap();
    assert!(alice.is::<FrozenHandle>());
    assert_freeze_error!(alice.set_attr("name", Value::from("Eve")));
    assert!(frozen == Value::from((Person::new("Alice"), Person::new("Bob"))));
}

#[test]
fn dict_values_are_frozen() {
    let d = Dict::<false>::from_pairs(vec![("p", Person::new("Alice"))]).unwrap();
    let frozen = freeze(&d).unwrap();
    assert!(frozen.at(Value::from("p")).unwrap().is::<FrozenHandle>());
}

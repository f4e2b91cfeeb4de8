use ::serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use ::serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;
use super::{FifoMap, FifoSet};

/// Entries are written in insertion order.
impl<K, V> Serialize for FifoMap<K, V> where K: Serialize, V: Serialize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self { map.serialize_entry(key, value)?; }
        map.end()
    }
}

struct MapVisitor<K, V>(PhantomData<fn() -> FifoMap<K, V>>);

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
    where K: Deserialize<'de> + Eq + Clone, V: Deserialize<'de> {

    type Value = FifoMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("a map") }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = FifoMap::new();

        // a repeated key keeps its first position and takes its last value
        while let Some((key, value)) = access.next_entry()? { map.insert_or_assign(key, value); }

        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for FifoMap<K, V>
    where K: Deserialize<'de> + Eq + Clone, V: Deserialize<'de> {

    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

/// Items are written in insertion order.
impl<T> Serialize for FifoSet<T> where T: Serialize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self { seq.serialize_element(item)?; }
        seq.end()
    }
}

struct SetVisitor<T>(PhantomData<fn() -> FifoSet<T>>);

impl<'de, T> Visitor<'de> for SetVisitor<T> where T: Deserialize<'de> + Eq + Clone {
    type Value = FifoSet<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("a sequence") }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = FifoSet::new();
        while let Some(item) = access.next_element()? { set.insert(item); }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for FifoSet<T> where T: Deserialize<'de> + Eq + Clone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}

#[cfg(test)]
mod test {
    use super::super::{FifoMap, FifoSet};

    #[test]
    fn map_serializes_in_insertion_order() {
        let map: FifoMap<_, _> = [("z", 1), ("a", 2), ("m", 3)].into();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn map_deserializes_in_document_order() {
        let map: FifoMap<String, i32> = serde_json::from_str(r#"{"q":1,"b":2,"x":3}"#).unwrap();
        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["q", "b", "x"]);
    }

    #[test]
    fn repeated_key_keeps_first_position_and_last_value() {
        let map: FifoMap<String, i32> = serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(map.into_iter().collect::<Vec<_>>(),
                   [("a".to_string(), 3), ("b".to_string(), 2)]);
    }

    #[test]
    fn set_round_trips() {
        let set: FifoSet<_> = [5, 1, 3].into();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[5,1,3]");

        let back: FifoSet<i32> = serde_json::from_str("[5,1,5,3]").unwrap();
        assert_eq!(back.iter().collect::<Vec<_>>(), [&5, &1, &3]);
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(serde_json::from_str::<FifoMap<String, i32>>("[1, 2]").is_err());
        assert!(serde_json::from_str::<FifoSet<i32>>("{}").is_err());
    }
}

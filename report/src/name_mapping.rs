use std::collections::HashMap;

/// Lookup from original class and member identities to their obfuscated names.
/// Classes are identified by their internal name (`Lcom/foo/Bar;`), members by their
/// owning class plus name and descriptor.
pub trait NameMapping {
    fn obfuscated_class(&self, class_name: &str) -> Option<&str>;

    fn obfuscated_field(
        &self,
        class_name: &str,
        field_name: &str,
        type_descriptor: &str,
    ) -> Option<&str>;

    fn obfuscated_method(
        &self,
        class_name: &str,
        method_name: &str,
        method_descriptor: &str,
    ) -> Option<&str>;
}

/// In-memory mapping table, keyed the way ProGuard members are usually spelled:
/// `Lcom/foo/Bar;.count:I` for fields, `Lcom/foo/Bar;.get:(I)V` for methods
#[derive(Debug, Default, Clone)]
pub struct ProguardMap {
    classes: HashMap<String, String>,
    fields: HashMap<String, String>,
    methods: HashMap<String, String>,
}

fn member_key(class_name: &str, member_name: &str, descriptor: &str) -> String {
    format!("{class_name}.{member_name}:{descriptor}")
}

impl ProguardMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns true if the mapping was new
    pub fn add_class(&mut self, class_name: &str, obfuscated_name: &str) -> bool {
        self.classes
            .insert(class_name.to_string(), obfuscated_name.to_string())
            .is_none()
    }

    pub fn add_field(
        &mut self,
        class_name: &str,
        field_name: &str,
        type_descriptor: &str,
        obfuscated_name: &str,
    ) -> bool {
        self.fields
            .insert(
                member_key(class_name, field_name, type_descriptor),
                obfuscated_name.to_string(),
            )
            .is_none()
    }

    pub fn add_method(
        &mut self,
        class_name: &str,
        method_name: &str,
        method_descriptor: &str,
        obfuscated_name: &str,
    ) -> bool {
        self.methods
            .insert(
                member_key(class_name, method_name, method_descriptor),
                obfuscated_name.to_string(),
            )
            .is_none()
    }
}

impl NameMapping for ProguardMap {
    fn obfuscated_class(&self, class_name: &str) -> Option<&str> {
        self.classes.get(class_name).map(String::as_str)
    }

    fn obfuscated_field(
        &self,
        class_name: &str,
        field_name: &str,
        type_descriptor: &str,
    ) -> Option<&str> {
        self.fields
            .get(&member_key(class_name, field_name, type_descriptor))
            .map(String::as_str)
    }

    fn obfuscated_method(
        &self,
        class_name: &str,
        method_name: &str,
        method_descriptor: &str,
    ) -> Option<&str> {
        self.methods
            .get(&member_key(class_name, method_name, method_descriptor))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::name_mapping::{NameMapping, ProguardMap};

    #[test]
    fn empty_map_has_no_mappings() {
        let map = ProguardMap::new();
        assert_eq!(None, map.obfuscated_class("Lcom/app/Widget;"));
        assert_eq!(None, map.obfuscated_field("Lcom/app/Widget;", "count", "I"));
        assert_eq!(
            None,
            map.obfuscated_method("Lcom/app/Widget;", "getCount", "()I")
        );
    }

    #[test]
    fn members_are_keyed_by_owner_name_and_descriptor() {
        let mut map = ProguardMap::new();
        assert!(map.add_field("Lcom/app/Widget;", "count", "I", "c"));
        assert!(map.add_method("Lcom/app/Widget;", "get", "(I)I", "a"));
        assert!(map.add_method("Lcom/app/Widget;", "get", "(J)I", "b"));

        assert_eq!(Some("c"), map.obfuscated_field("Lcom/app/Widget;", "count", "I"));
        assert_eq!(None, map.obfuscated_field("Lcom/app/Widget;", "count", "J"));
        assert_eq!(None, map.obfuscated_field("Lcom/app/Other;", "count", "I"));
        assert_eq!(Some("a"), map.obfuscated_method("Lcom/app/Widget;", "get", "(I)I"));
        assert_eq!(Some("b"), map.obfuscated_method("Lcom/app/Widget;", "get", "(J)I"));
    }

    #[test]
    fn adding_twice_replaces_and_reports_it() {
        let mut map = ProguardMap::new();
        assert!(map.add_class("Lcom/app/Widget;", "a"));
        assert!(!map.add_class("Lcom/app/Widget;", "b"));
        assert_eq!(Some("b"), map.obfuscated_class("Lcom/app/Widget;"));
    }
}

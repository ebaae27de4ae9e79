use indexmap::IndexMap;

/// Derive the one-to-many relation index from the raw relation map.
///
/// Structure-schema keys are walked in reverse declaration order so that
/// relations declared by deeper types are resolved against the complete
/// schema rather than a prefix of it. Only relations whose target appears
/// as a structure-schema key survive; surviving entries keep their original
/// property key under their original source.
pub(crate) fn one_to_many_index(
    structure: &IndexMap<String, IndexMap<String, String>>,
    relations: &IndexMap<String, IndexMap<String, String>>,
) -> IndexMap<String, IndexMap<String, String>> {
    let mut index: IndexMap<String, IndexMap<String, String>> = IndexMap::new();

    for key in structure.keys().rev() {
        let sources = relations
            .iter()
            .filter(|(_, targets)| targets.values().any(|target| target == key));

        for (source, targets) in sources {
            for (property, target) in targets {
                if target == key {
                    index
                        .entry(source.clone())
                        .or_default()
                        .insert(property.clone(), target.clone());
                }
            }
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[(&str, &str)])]) -> IndexMap<String, IndexMap<String, String>> {
        entries
            .iter()
            .map(|(key, pairs)| {
                (
                    key.to_string(),
                    pairs
                        .iter()
                        .map(|(property, target)| (property.to_string(), target.to_string()))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn relations_to_types_outside_the_structure_are_dropped() {
        let index = one_to_many_index(
            &map(&[("Order", &[("items", "Item")]), ("Item", &[])]),
            &map(&[("Order", &[("items", "Item"), ("tags", "Tag")])]),
        );

        assert_eq!(index.len(), 1);
        let order = &index["Order"];
        assert_eq!(order.len(), 1);
        assert_eq!(order["items"], "Item");
    }

    #[test]
    fn sources_are_grouped_in_reverse_structure_order() {
        let index = one_to_many_index(
            &map(&[("A", &[]), ("B", &[])]),
            &map(&[("X", &[("as", "A")]), ("Y", &[("bs", "B")])]),
        );

        let sources: Vec<_> = index.keys().collect();
        assert_eq!(sources, ["Y", "X"]);
    }

    #[test]
    fn a_source_keeps_every_matching_relation() {
        let index = one_to_many_index(
            &map(&[("Order", &[]), ("Invoice", &[])]),
            &map(&[("Customer", &[("orders", "Order"), ("invoices", "Invoice")])]),
        );

        let customer = &index["Customer"];
        assert_eq!(customer["orders"], "Order");
        assert_eq!(customer["invoices"], "Invoice");
    }

    #[test]
    fn empty_inputs_yield_an_empty_index() {
        assert!(one_to_many_index(&IndexMap::new(), &map(&[("X", &[("as", "A")])])).is_empty());
        assert!(one_to_many_index(&map(&[("A", &[])]), &IndexMap::new()).is_empty());
    }
}

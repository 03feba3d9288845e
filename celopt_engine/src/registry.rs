use std::collections::TryReserveError;

use crate::convert::Value;
use crate::diagnostics::AmbiguousMatches;
use crate::model::{OptionSpec, OptionTable};

/// Invoked synchronously when an option of an extension table matches, with the option's code and converted argument.
pub type Callback<'a> = Box<dyn FnMut(u32, Option<&Value>) + 'a>;

struct ChainNode<'a> {
    table: &'a OptionTable<'a>,
    callback: Option<Callback<'a>>,
}

/// Where a matched option came from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Found<'a> {
    pub(crate) node: usize,
    pub(crate) spec: &'a OptionSpec<'a>,
}

#[derive(Debug)]
pub(crate) enum LongMatch<'a> {
    Unique(Found<'a>),
    Ambiguous,
    Unknown,
}

/// The primary table followed by its extensions, in registration order.
///
/// Registration order is match priority: when two tables define the same short code, the earlier one wins.
pub(crate) struct TableChain<'a> {
    nodes: Vec<ChainNode<'a>>,
}

impl<'a> std::fmt::Debug for TableChain<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableChain")
            .field("tables", &self.nodes.len())
            .finish()
    }
}

impl<'a> TableChain<'a> {
    pub(crate) fn register(primary: &'a OptionTable<'a>) -> Self {
        Self {
            nodes: vec![ChainNode {
                table: primary,
                callback: None,
            }],
        }
    }

    pub(crate) fn extend(
        &mut self,
        table: &'a OptionTable<'a>,
        callback: Option<Callback<'a>>,
    ) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(ChainNode { table, callback });
        Ok(())
    }

    /// Drop every extension node, keeping the primary table.
    pub(crate) fn release_extensions(&mut self) {
        self.nodes.truncate(1);
    }

    pub(crate) fn primary(&self) -> &'a OptionTable<'a> {
        self.nodes[0].table
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn callback(&mut self, node: usize) -> Option<&mut Callback<'a>> {
        self.nodes[node].callback.as_mut()
    }

    fn options(&self) -> impl Iterator<Item = Found<'a>> + '_ {
        self.nodes.iter().enumerate().flat_map(|(node, chain_node)| {
            let table: &'a OptionTable<'a> = chain_node.table;
            table
                .options()
                .iter()
                .map(move |spec| Found { node, spec })
        })
    }

    /// The first option, in chain order, whose short code is `c`.
    pub(crate) fn find_short(&self, c: char) -> Option<Found<'a>> {
        self.options().find(|found| found.spec.matches_short(c))
    }

    /// Match `name` as an exact long name, or else as an unambiguous prefix of one, across the whole chain.
    ///
    /// An ambiguous prefix records the distinct candidate names into `ambiguous`.
    pub(crate) fn find_long(&self, name: &str, ambiguous: &mut AmbiguousMatches) -> LongMatch<'a> {
        if name.is_empty() {
            return LongMatch::Unknown;
        }

        if let Some(found) = self.options().find(|found| found.spec.long_name() == name) {
            return LongMatch::Unique(found);
        }

        let mut candidates: Vec<Found<'a>> = Vec::default();

        for found in self.options() {
            let long = found.spec.long_name();

            if long.starts_with(name)
                && !candidates
                    .iter()
                    .any(|candidate| candidate.spec.long_name() == long)
            {
                candidates.push(found);
            }
        }

        match candidates.as_slice() {
            [] => LongMatch::Unknown,
            [found] => LongMatch::Unique(*found),
            _ => {
                for candidate in &candidates {
                    ambiguous.push(candidate.spec.long_name());
                }
                LongMatch::Ambiguous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArgType;
    use std::cell::RefCell;

    fn primary() -> OptionTable<'static> {
        OptionTable::new(vec![
            OptionSpec::new("verbose", 'v' as u32),
            OptionSpec::new("version", 'V' as u32),
            OptionSpec::new("file", 'f' as u32).required(ArgType::Str),
            OptionSpec::short('x'),
        ])
    }

    fn extension() -> OptionTable<'static> {
        OptionTable::new(vec![
            OptionSpec::new("xarg", 'x' as u32).required(ArgType::Str),
            OptionSpec::new("filter", 'F' as u32),
            OptionSpec::new("verbose", 'w' as u32),
        ])
    }

    #[test]
    fn short_priority() {
        let primary = primary();
        let extension = extension();
        let mut chain = TableChain::register(&primary);
        chain.extend(&extension, None).unwrap();

        let found = chain.find_short('x').unwrap();
        assert_eq!(found.node, 0);
        assert_eq!(found.spec.long_name(), "");

        let found = chain.find_short('F').unwrap();
        assert_eq!(found.node, 1);
        assert_eq!(found.spec.long_name(), "filter");

        assert_matches!(chain.find_short('q'), None);
    }

    #[test]
    fn long_exact() {
        let primary = primary();
        let extension = extension();
        let mut chain = TableChain::register(&primary);
        chain.extend(&extension, None).unwrap();
        let mut ambiguous = AmbiguousMatches::default();

        assert_matches!(
            chain.find_long("file", &mut ambiguous),
            LongMatch::Unique(Found { node: 0, .. })
        );
        // The duplicate long name resolves to the earlier table.
        assert_matches!(
            chain.find_long("verbose", &mut ambiguous),
            LongMatch::Unique(Found { node: 0, spec }) if spec.code() == 'v' as u32
        );
        assert_matches!(
            chain.find_long("xarg", &mut ambiguous),
            LongMatch::Unique(Found { node: 1, .. })
        );
        assert!(ambiguous.is_empty());
    }

    #[test]
    fn long_prefix() {
        let primary = primary();
        let extension = extension();
        let mut chain = TableChain::register(&primary);
        chain.extend(&extension, None).unwrap();
        let mut ambiguous = AmbiguousMatches::default();

        assert_matches!(
            chain.find_long("verb", &mut ambiguous),
            LongMatch::Unique(Found { node: 0, .. })
        );
        assert_matches!(
            chain.find_long("xa", &mut ambiguous),
            LongMatch::Unique(Found { node: 1, .. })
        );
        assert_matches!(chain.find_long("zzz", &mut ambiguous), LongMatch::Unknown);
        assert_matches!(chain.find_long("", &mut ambiguous), LongMatch::Unknown);
        assert!(ambiguous.is_empty());
    }

    #[test]
    fn long_ambiguous_across_tables() {
        let primary = primary();
        let extension = extension();
        let mut chain = TableChain::register(&primary);
        chain.extend(&extension, None).unwrap();
        let mut ambiguous = AmbiguousMatches::default();

        assert_matches!(chain.find_long("ver", &mut ambiguous), LongMatch::Ambiguous);
        assert_eq!(ambiguous.names(), &["verbose", "version"]);

        ambiguous.clear();
        assert_matches!(chain.find_long("fi", &mut ambiguous), LongMatch::Ambiguous);
        assert_eq!(ambiguous.names(), &["file", "filter"]);
    }

    #[test]
    fn long_prefix_declaration_order() {
        let forward = OptionTable::new(vec![
            OptionSpec::new("alpha", 'a' as u32),
            OptionSpec::new("beta", 'b' as u32),
        ]);
        let backward = OptionTable::new(vec![
            OptionSpec::new("beta", 'b' as u32),
            OptionSpec::new("alpha", 'a' as u32),
        ]);
        let mut ambiguous = AmbiguousMatches::default();

        for table in [&forward, &backward] {
            let chain = TableChain::register(table);
            assert_matches!(
                chain.find_long("al", &mut ambiguous),
                LongMatch::Unique(Found { spec, .. }) if spec.code() == 'a' as u32
            );
        }
    }

    #[test]
    fn directive_is_not_an_option() {
        let table = OptionTable::require_order(vec![OptionSpec::short('a')]);
        let chain = TableChain::register(&table);
        let mut ambiguous = AmbiguousMatches::default();

        assert_matches!(chain.find_long("+", &mut ambiguous), LongMatch::Unknown);
        assert_matches!(chain.find_short('a'), Some(_));
    }

    #[test]
    fn callbacks_and_release() {
        let calls = RefCell::new(Vec::default());
        let primary = primary();
        let extension = extension();
        let mut chain = TableChain::register(&primary);
        chain
            .extend(
                &extension,
                Some(Box::new(|code: u32, _: Option<&Value>| {
                    calls.borrow_mut().push(code)
                })),
            )
            .unwrap();
        assert_eq!(chain.len(), 2);
        assert!(chain.callback(0).is_none());

        let callback = chain.callback(1).unwrap();
        callback('x' as u32, None);
        assert_eq!(calls.borrow().as_slice(), &['x' as u32]);

        chain.release_extensions();
        assert_eq!(chain.len(), 1);
        assert!(std::ptr::eq(chain.primary(), &primary));
    }
}

use std::cell::Cell;

use crate::allocator::{reserve_one, AllocError, Allocator};
use crate::model::{Label, Mode, Names};

/// The parameter kind, together with the caller owned storage it writes into.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Kind<'a> {
    Flag {
        names: Names<'a>,
        target: &'a Cell<bool>,
    },
    Value {
        names: Names<'a>,
        target: &'a Cell<Option<&'a str>>,
    },
    Positional {
        index: usize,
        target: &'a Cell<Option<&'a str>>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct ArgumentSpec<'a> {
    kind: Kind<'a>,
    help: Option<&'a str>,
    mode: Mode,
    found: bool,
}

impl<'a> ArgumentSpec<'a> {
    pub(crate) fn kind(&self) -> &Kind<'a> {
        &self.kind
    }

    pub(crate) fn help(&self) -> Option<&'a str> {
        self.help
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn found(&self) -> bool {
        self.found
    }

    /// The names of a flag or value option; `None` for positionals.
    pub(crate) fn names(&self) -> Option<Names<'a>> {
        match self.kind {
            Kind::Flag { names, .. } | Kind::Value { names, .. } => Some(names),
            Kind::Positional { .. } => None,
        }
    }

    /// The label of a positional; `None` for flags and value options.
    pub(crate) fn label(&self) -> Option<Label<'a>> {
        match self.kind {
            Kind::Positional { index, .. } => Some(Label::new(self.help, index)),
            Kind::Flag { .. } | Kind::Value { .. } => None,
        }
    }

    /// Mark as matched.
    /// A flag captures `true` immediately, whereas a value option reports it is now awaiting its value.
    pub(crate) fn matched(&mut self) -> bool {
        self.found = true;

        match self.kind {
            Kind::Flag { target, .. } => {
                target.set(true);
                false
            }
            Kind::Value { .. } => true,
            Kind::Positional { .. } => false,
        }
    }

    pub(crate) fn capture(&mut self, value: &'a str) {
        match self.kind {
            Kind::Value { target, .. } | Kind::Positional { target, .. } => {
                self.found = true;
                target.set(Some(value));
            }
            Kind::Flag { .. } => {
                unreachable!("internal error - must not capture a value on a flag")
            }
        }
    }
}

/// The ordered collection of registered parameters.
///
/// Registration order defines the help order, the positional order, and the matching priority.
#[derive(Debug, Default)]
pub(crate) struct Registry<'a> {
    specs: Vec<ArgumentSpec<'a>>,
    next_positional: usize,
}

impl<'a> Registry<'a> {
    pub(crate) fn flag(
        &mut self,
        allocator: &dyn Allocator,
        names: Names<'a>,
        target: &'a Cell<bool>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<(), AllocError> {
        self.push(allocator, Kind::Flag { names, target }, help, mode)
    }

    pub(crate) fn value(
        &mut self,
        allocator: &dyn Allocator,
        names: Names<'a>,
        target: &'a Cell<Option<&'a str>>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<(), AllocError> {
        self.push(allocator, Kind::Value { names, target }, help, mode)
    }

    /// Register the next positional, returning its index.
    pub(crate) fn positional(
        &mut self,
        allocator: &dyn Allocator,
        target: &'a Cell<Option<&'a str>>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<usize, AllocError> {
        let index = self.next_positional;
        let next = index.checked_add(1).ok_or(AllocError::CapacityOverflow)?;
        self.push(allocator, Kind::Positional { index, target }, help, mode)?;
        self.next_positional = next;
        Ok(index)
    }

    fn push(
        &mut self,
        allocator: &dyn Allocator,
        kind: Kind<'a>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<(), AllocError> {
        // Reserve first, so a refused allocation leaves the registry untouched.
        reserve_one(allocator, &mut self.specs)?;
        self.specs.push(ArgumentSpec {
            kind,
            help,
            mode,
            found: false,
        });
        Ok(())
    }

    pub(crate) fn specs(&self) -> &[ArgumentSpec<'a>] {
        &self.specs
    }

    pub(crate) fn spec_mut(&mut self, index: usize) -> &mut ArgumentSpec<'a> {
        &mut self.specs[index]
    }

    pub(crate) fn has_named(&self) -> bool {
        self.specs.iter().any(|spec| spec.names().is_some())
    }

    /// Forget the matches from a previous parse.
    pub(crate) fn reset(&mut self) {
        for spec in self.specs.iter_mut() {
            spec.found = false;
        }
    }

    /// The first required parameter (in registration order) which was not matched.
    pub(crate) fn first_unmet(&self) -> Option<&ArgumentSpec<'a>> {
        self.specs
            .iter()
            .find(|spec| spec.mode() == Mode::Required && !spec.found())
    }

    /// Drop every registration and give the storage back.
    pub(crate) fn release(&mut self) {
        self.specs = Vec::new();
        self.next_positional = 0;
    }
}

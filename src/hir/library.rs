//! Embedded-language library lookup.
//!
//! Keyword libraries and variable files are implemented in Python. The
//! analysis core never executes Python; it asks a [`LibraryProvider`] for
//! already-indexed descriptions of classes and modules. Hosts that index a
//! Python environment implement the trait; tests use [`InMemoryLibraries`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// A function or method exposed by a library.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PyMember {
    pub name: SmolStr,
    pub has_arguments: bool,
}

impl PyMember {
    pub fn new(name: impl Into<SmolStr>, has_arguments: bool) -> Self {
        Self {
            name: name.into(),
            has_arguments,
        }
    }
}

/// A keyword library class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PyClass {
    /// Fully qualified name, e.g. `robot.libraries.Collections.Collections`.
    pub qualified_name: SmolStr,
    pub members: Vec<PyMember>,
}

impl PyClass {
    pub fn new(qualified_name: impl Into<SmolStr>, members: Vec<PyMember>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            members,
        }
    }

    /// Last segment of the qualified name.
    pub fn short_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

/// A Python module: variable file or keyword module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PyModule {
    pub qualified_name: SmolStr,
    pub members: Vec<PyMember>,
    /// Module-level variable names, without decoration (`HOST`, not `${HOST}`).
    pub variables: Vec<SmolStr>,
}

impl PyModule {
    pub fn new(
        qualified_name: impl Into<SmolStr>,
        members: Vec<PyMember>,
        variables: Vec<SmolStr>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            members,
            variables,
        }
    }
}

/// Read-only view of an indexed Python environment.
pub trait LibraryProvider: Send + Sync {
    /// Find a class by qualified or short name.
    fn find_class(&self, name: &str) -> Option<Arc<PyClass>>;

    /// Find a module by qualified name or file path.
    fn find_module(&self, name: &str) -> Option<Arc<PyModule>>;

    /// Find a member of a class by its exact Python name.
    fn find_member(&self, class: &str, member: &str) -> Option<PyMember> {
        self.find_class(class)?
            .members
            .iter()
            .find(|m| m.name == member)
            .cloned()
    }
}

/// Provider with nothing in it: no library resolves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLibraries;

impl LibraryProvider for NoLibraries {
    fn find_class(&self, _name: &str) -> Option<Arc<PyClass>> {
        None
    }

    fn find_module(&self, _name: &str) -> Option<Arc<PyModule>> {
        None
    }
}

/// Provider backed by pre-registered descriptions.
///
/// Classes are found by qualified name, by short name, and by
/// `robot.libraries.<name>` for standard libraries imported by short name.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLibraries {
    classes: FxHashMap<SmolStr, Arc<PyClass>>,
    modules: FxHashMap<SmolStr, Arc<PyModule>>,
}

impl InMemoryLibraries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: PyClass) -> &mut Self {
        let class = Arc::new(class);
        self.classes
            .insert(SmolStr::new(class.short_name()), class.clone());
        self.classes.insert(class.qualified_name.clone(), class);
        self
    }

    pub fn add_module(&mut self, module: PyModule) -> &mut Self {
        self.modules
            .insert(module.qualified_name.clone(), Arc::new(module));
        self
    }

    pub fn with_class(mut self, class: PyClass) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_module(mut self, module: PyModule) -> Self {
        self.add_module(module);
        self
    }
}

impl LibraryProvider for InMemoryLibraries {
    fn find_class(&self, name: &str) -> Option<Arc<PyClass>> {
        self.classes.get(name).cloned().or_else(|| {
            let standard = format!(
                "{}.{}",
                crate::base::constants::STANDARD_LIBRARY_PACKAGE,
                name
            );
            self.classes.get(standard.as_str()).cloned()
        })
    }

    fn find_module(&self, name: &str) -> Option<Arc<PyModule>> {
        self.modules.get(name).cloned()
    }
}

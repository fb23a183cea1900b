//! Import targets and the context needed to resolve them.
//!
//! An import names a robot resource file, a keyword library, or a variable
//! file. [`KeywordFile`] is the closed set of things an import can resolve
//! to; every per-kind behavior is a `match` over it.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use super::builtins::ProjectData;
use super::file::{ImportDecl, RobotFile};
use super::library::{LibraryProvider, PyClass, PyModule};
use super::symbols::{
    DefinedKeyword, DefinedVariable, ImportType, SymbolLocation, VariableScope, Visibility,
};
use crate::base::FileId;
use crate::base::constants::ROBOT_BUILT_IN;
use crate::project::RobotOptions;

/// Everything import resolution needs from the surrounding workspace.
pub trait ImportContext {
    /// A robot document known to the workspace.
    fn file(&self, file: FileId) -> Option<&RobotFile>;

    /// Resolve a `Resource` import target written in `from`.
    fn resolve_resource(&self, from: FileId, target: &str) -> Option<FileId>;

    fn libraries(&self) -> &dyn LibraryProvider;

    fn project(&self) -> &ProjectData;

    fn options(&self) -> &RobotOptions;
}

/// A resolved import target.
#[derive(Clone, Debug)]
pub enum KeywordFile {
    /// A robot resource (or test suite) document.
    Robot(FileId),
    /// A keyword library, referenced in invocations by `namespace`.
    Library {
        namespace: SmolStr,
        class: Arc<PyClass>,
    },
    /// A variable file.
    Variables(Arc<PyModule>),
}

impl KeywordFile {
    /// The always-imported `BuiltIn` library, when the provider knows it.
    pub fn built_in(libraries: &dyn LibraryProvider) -> Option<Self> {
        libraries
            .find_class(ROBOT_BUILT_IN)
            .map(|class| KeywordFile::Library {
                namespace: SmolStr::new(ROBOT_BUILT_IN),
                class,
            })
    }

    pub fn import_type(&self) -> ImportType {
        match self {
            KeywordFile::Robot(_) => ImportType::Resource,
            KeywordFile::Library { .. } => ImportType::Library,
            KeywordFile::Variables(_) => ImportType::Variables,
        }
    }

    /// The robot document behind this import, if any.
    pub fn file_id(&self) -> Option<FileId> {
        match self {
            KeywordFile::Robot(file) => Some(*file),
            KeywordFile::Library { .. } | KeywordFile::Variables(_) => None,
        }
    }

    /// Keywords declared directly by the target.
    pub fn defined_keywords(&self, ctx: &dyn ImportContext) -> Vec<DefinedKeyword> {
        match self {
            KeywordFile::Robot(file) => ctx
                .file(*file)
                .map(RobotFile::defined_keywords)
                .unwrap_or_default(),
            KeywordFile::Library { namespace, class } => {
                ctx.project().library_keywords(namespace, class).to_vec()
            }
            KeywordFile::Variables(_) => Vec::new(),
        }
    }

    /// Variables declared directly by the target.
    pub fn own_defined_variables(&self, ctx: &dyn ImportContext) -> Vec<DefinedVariable> {
        match self {
            KeywordFile::Robot(file) => ctx
                .file(*file)
                .map(RobotFile::own_defined_variables)
                .unwrap_or_default(),
            KeywordFile::Library { .. } => Vec::new(),
            KeywordFile::Variables(module) => module
                .variables
                .iter()
                .map(|name| {
                    DefinedVariable::new(
                        &format!("${{{}}}", name),
                        VariableScope::Global,
                        Visibility::Everywhere,
                        SymbolLocation::Library {
                            library: module.qualified_name.clone(),
                            member: name.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Direct imports of the target, used for transitive resolution.
    pub fn imported_files(&self, ctx: &dyn ImportContext) -> Vec<KeywordFile> {
        match self {
            KeywordFile::Robot(file) => ctx
                .file(*file)
                .map(|f| f.imported_files(ctx, false))
                .unwrap_or_default(),
            KeywordFile::Library { .. } | KeywordFile::Variables(_) => Vec::new(),
        }
    }
}

// Identity is the target, not the loaded description.
impl PartialEq for KeywordFile {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeywordFile::Robot(a), KeywordFile::Robot(b)) => a == b,
            (
                KeywordFile::Library {
                    namespace: ns_a,
                    class: a,
                },
                KeywordFile::Library {
                    namespace: ns_b,
                    class: b,
                },
            ) => ns_a == ns_b && a.qualified_name == b.qualified_name,
            (KeywordFile::Variables(a), KeywordFile::Variables(b)) => {
                a.qualified_name == b.qualified_name
            }
            _ => false,
        }
    }
}

impl Eq for KeywordFile {}

impl Hash for KeywordFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            KeywordFile::Robot(file) => file.hash(state),
            KeywordFile::Library { namespace, class } => {
                namespace.hash(state);
                class.qualified_name.hash(state);
            }
            KeywordFile::Variables(module) => module.qualified_name.hash(state),
        }
    }
}

/// Namespace a library import is referenced by: the alias if given,
/// otherwise the last segment of the target without a `.py` suffix.
pub fn library_namespace(decl: &ImportDecl) -> SmolStr {
    if let Some(alias) = &decl.alias {
        return alias.clone();
    }
    let target = decl.target.trim_end_matches(['/', '\\']);
    let last = target.rsplit(['/', '\\']).next().unwrap_or(target);
    SmolStr::new(last.strip_suffix(".py").unwrap_or(last))
}

/// Resolve an import declared in `from`. `None` means "unknown target".
pub fn resolve_import(
    ctx: &dyn ImportContext,
    from: FileId,
    decl: &ImportDecl,
) -> Option<KeywordFile> {
    let resolved = match decl.import_type {
        ImportType::Resource => ctx.resolve_resource(from, &decl.target).map(KeywordFile::Robot),
        ImportType::Library => {
            let libraries = ctx.libraries();
            let class = libraries.find_class(&decl.target).or_else(|| {
                // module-style libraries expose their functions as keywords
                libraries.find_module(&decl.target).map(|module| {
                    Arc::new(PyClass::new(
                        module.qualified_name.clone(),
                        module.members.clone(),
                    ))
                })
            });
            class.map(|class| KeywordFile::Library {
                namespace: library_namespace(decl),
                class,
            })
        }
        ImportType::Variables => ctx
            .libraries()
            .find_module(&decl.target)
            .map(KeywordFile::Variables),
    };
    if resolved.is_none() {
        tracing::debug!(
            file = %from,
            target = %decl.target,
            kind = decl.import_type.as_str(),
            "unresolved import"
        );
    }
    resolved
}

//! Per-class member scopes.
//!
//! A `MemberScope` is a queryable view over a class's effective members
//! (declared + inherited), built once per checked class. The override index
//! for a name is populated lazily by the first by-name lookup; the
//! direct-overrides queries consult that index, so callers prime the scope
//! with a by-name lookup (result discarded) before asking for overrides.
//!
//! Symbols for inherited members are produced as seen through the supertype's
//! substitution context: class-level type arguments are already applied to
//! the signature, composed along the inheritance path.

use crate::decl::{ClassTable, MemberDecl, MemberRef, TypeRef};
use kyn_common::Atom;
use kyn_solver::{ClassStore, DefId, TypeData, TypeInterner, TypeSubstitution, substitute_type};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Control signal returned by override visitors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessorAction {
    Next,
    Stop,
}

/// The two member namespaces. A property and a function may share a name
/// without conflicting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Function,
    Property,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A member declaration as seen through a particular supertype's substitution
/// context.
///
/// Symbols are transient (produced by scope queries, not persisted) and
/// compare by identity: the backing declaration reference, or a fresh counter
/// for symbols with no backing declaration.
#[derive(Clone, Debug)]
pub struct MemberSymbol {
    sym_id: u64,
    /// Backing declaration, if any. Scope-produced symbols always have one.
    pub decl: Option<MemberRef>,
    pub name: Atom,
    pub kind: MemberKind,
    /// Return type for functions, property type for properties, with
    /// class-level substitutions applied.
    pub signature_type: TypeRef,
    pub is_mutable: bool,
}

impl MemberSymbol {
    fn next_id() -> u64 {
        NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed)
    }

    fn from_decl(member_ref: MemberRef, member: &MemberDecl) -> Option<Self> {
        match member {
            MemberDecl::Function(f) => Some(Self {
                sym_id: Self::next_id(),
                decl: Some(member_ref),
                name: f.name,
                kind: MemberKind::Function,
                signature_type: f.return_type.clone(),
                is_mutable: false,
            }),
            MemberDecl::Property(p) => Some(Self {
                sym_id: Self::next_id(),
                decl: Some(member_ref),
                name: p.name,
                kind: MemberKind::Property,
                signature_type: p.ty.clone(),
                is_mutable: p.is_mutable,
            }),
            MemberDecl::Constructor(_) | MemberDecl::NestedClass(_) => None,
        }
    }

    fn substituted(
        types: &TypeInterner,
        member_ref: MemberRef,
        member: &MemberDecl,
        subst: &TypeSubstitution,
    ) -> Option<Self> {
        let mut symbol = Self::from_decl(member_ref, member)?;
        if let TypeRef::Resolved { ty, source } = symbol.signature_type {
            symbol.signature_type = TypeRef::Resolved {
                ty: substitute_type(types, ty, subst),
                source,
            };
        }
        Some(symbol)
    }

    /// The symbol for a member as declared, with no substitution applied.
    pub fn for_declaration(class: &crate::decl::ClassDecl, index: usize) -> Option<Self> {
        let member = class.members.get(index)?;
        Self::from_decl(
            MemberRef {
                owner: class.def,
                index: u32::try_from(index).ok()?,
            },
            member,
        )
    }

    /// A symbol with no backing declaration (non-declaration-backed member,
    /// e.g. a synthesized intersection member).
    pub fn synthetic(name: Atom, kind: MemberKind, signature_type: TypeRef) -> Self {
        Self {
            sym_id: Self::next_id(),
            decl: None,
            name,
            kind,
            signature_type,
            is_mutable: false,
        }
    }
}

impl PartialEq for MemberSymbol {
    fn eq(&self, other: &Self) -> bool {
        match (self.decl, other.decl) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.sym_id == other.sym_id,
            _ => false,
        }
    }
}

impl Eq for MemberSymbol {}

impl std::hash::Hash for MemberSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self.decl {
            Some(d) => {
                0u8.hash(state);
                d.hash(state);
            }
            None => {
                1u8.hash(state);
                self.sym_id.hash(state);
            }
        }
    }
}

type OverrideList = SmallVec<[MemberSymbol; 2]>;

#[derive(Default)]
struct NameBinding {
    symbols: Vec<MemberSymbol>,
    /// Direct override sets for this class's own members with the indexed
    /// name. Never contains the keyed declaration itself.
    direct_overrides: FxHashMap<MemberRef, OverrideList>,
}

/// Queryable view over a class's effective members.
pub struct MemberScope<'a> {
    types: &'a TypeInterner,
    classes: &'a ClassStore,
    table: &'a ClassTable,
    class: DefId,
    index: FxHashMap<(Atom, MemberKind), NameBinding>,
}

impl<'a> MemberScope<'a> {
    pub fn new(
        types: &'a TypeInterner,
        classes: &'a ClassStore,
        table: &'a ClassTable,
        class: DefId,
    ) -> Self {
        Self {
            types,
            classes,
            table,
            class,
            index: FxHashMap::default(),
        }
    }

    /// All function symbols with the given name, declared or inherited.
    ///
    /// Side effect: populates the override index for this name, which the
    /// direct-overrides queries depend on.
    pub fn functions_by_name(&mut self, name: Atom) -> Vec<MemberSymbol> {
        self.by_name(name, MemberKind::Function)
    }

    /// Property counterpart of [`Self::functions_by_name`].
    pub fn properties_by_name(&mut self, name: Atom) -> Vec<MemberSymbol> {
        self.by_name(name, MemberKind::Property)
    }

    /// Visit the symbols a function of this class directly overrides.
    ///
    /// Requires a prior `functions_by_name` call for the symbol's name;
    /// without it the index holds nothing and no symbol is visited.
    pub fn direct_overrides_of_function(
        &self,
        symbol: &MemberSymbol,
        visit: impl FnMut(&MemberSymbol) -> ProcessorAction,
    ) {
        self.visit_direct_overrides(symbol, MemberKind::Function, visit);
    }

    /// Property counterpart of [`Self::direct_overrides_of_function`].
    pub fn direct_overrides_of_property(
        &self,
        symbol: &MemberSymbol,
        visit: impl FnMut(&MemberSymbol) -> ProcessorAction,
    ) {
        self.visit_direct_overrides(symbol, MemberKind::Property, visit);
    }

    fn by_name(&mut self, name: Atom, kind: MemberKind) -> Vec<MemberSymbol> {
        self.prime(name, kind);
        self.index
            .get(&(name, kind))
            .map(|binding| binding.symbols.clone())
            .unwrap_or_default()
    }

    fn visit_direct_overrides(
        &self,
        symbol: &MemberSymbol,
        kind: MemberKind,
        mut visit: impl FnMut(&MemberSymbol) -> ProcessorAction,
    ) {
        let Some(binding) = self.index.get(&(symbol.name, kind)) else {
            return;
        };
        let Some(decl) = symbol.decl else {
            return;
        };
        let Some(overridden) = binding.direct_overrides.get(&decl) else {
            return;
        };
        for overridden_symbol in overridden {
            if visit(overridden_symbol) == ProcessorAction::Stop {
                break;
            }
        }
    }

    fn prime(&mut self, name: Atom, kind: MemberKind) {
        if self.index.contains_key(&(name, kind)) {
            return;
        }

        let mut binding = NameBinding::default();
        if let Some(class) = self.table.class(self.class) {
            let mut inherited: Vec<MemberSymbol> = Vec::new();
            let mut seen = FxHashSet::default();
            let mut visited_classes = FxHashSet::default();
            visited_classes.insert(self.class);
            self.collect_from_supertypes(
                &class.supertypes,
                &TypeSubstitution::new(),
                name,
                kind,
                &mut inherited,
                &mut seen,
                &mut visited_classes,
            );

            for (index, member) in class.members.iter().enumerate() {
                if !Self::member_matches(member, name, kind) {
                    continue;
                }
                let Ok(index) = u32::try_from(index) else {
                    continue;
                };
                let member_ref = MemberRef {
                    owner: self.class,
                    index,
                };
                if let Some(symbol) = MemberSymbol::from_decl(member_ref, member) {
                    binding.symbols.push(symbol);
                    binding
                        .direct_overrides
                        .insert(member_ref, inherited.iter().cloned().collect());
                }
            }
            binding.symbols.extend(inherited);

            trace!(
                class = self.class.0,
                ?kind,
                symbols = binding.symbols.len(),
                "MemberScope primed name"
            );
        }
        self.index.insert((name, kind), binding);
    }

    /// Collect the nearest member named `name` along each immediate-supertype
    /// path, with the path's class-level substitutions composed. Classes that
    /// declare a matching member shadow their own supertypes (those deeper
    /// declarations are transitively re-derived, not direct overrides).
    fn collect_from_supertypes(
        &self,
        supertypes: &[kyn_solver::TypeId],
        subst: &TypeSubstitution,
        name: Atom,
        kind: MemberKind,
        out: &mut Vec<MemberSymbol>,
        seen: &mut FxHashSet<MemberRef>,
        visited_classes: &mut FxHashSet<DefId>,
    ) {
        for &supertype in supertypes {
            let instantiated = substitute_type(self.types, supertype, subst);
            let TypeData::Class { def, args, .. } = self.types.lookup(instantiated) else {
                continue;
            };
            if !visited_classes.insert(def) {
                continue;
            }
            let Some(class) = self.table.class(def) else {
                continue;
            };

            let params = self.classes.get_type_params(def).unwrap_or_default();
            let local = TypeSubstitution::from_pairs(
                params.iter().map(|p| p.id).zip(args.iter().copied()),
            );

            let mut found = false;
            for (index, member) in class.members.iter().enumerate() {
                if !Self::member_matches(member, name, kind) {
                    continue;
                }
                found = true;
                let Ok(index) = u32::try_from(index) else {
                    continue;
                };
                let member_ref = MemberRef {
                    owner: def,
                    index,
                };
                if seen.insert(member_ref)
                    && let Some(symbol) =
                        MemberSymbol::substituted(self.types, member_ref, member, &local)
                {
                    out.push(symbol);
                }
            }

            if !found {
                self.collect_from_supertypes(
                    &class.supertypes,
                    &local,
                    name,
                    kind,
                    out,
                    seen,
                    visited_classes,
                );
            }
        }
    }

    fn member_matches(member: &MemberDecl, name: Atom, kind: MemberKind) -> bool {
        match member {
            MemberDecl::Function(f) => kind == MemberKind::Function && f.name == name,
            MemberDecl::Property(p) => kind == MemberKind::Property && p.name == name,
            MemberDecl::Constructor(_) | MemberDecl::NestedClass(_) => false,
        }
    }
}

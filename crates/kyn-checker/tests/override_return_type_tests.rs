mod support;

use kyn_common::diagnostic_codes;
use support::{FILE, World, spanless, spanned};

#[test]
fn narrowing_override_is_accepted() {
    let mut world = World::new();

    let number = world.class("Number", vec![], vec![]);
    let number_ty = world.types.class(number, vec![], false);
    let int = world.class("Int", vec![number_ty], vec![]);
    let int_ty = world.types.class(int, vec![], false);

    let base_members = vec![world.function("f", spanned(number_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", spanned(int_ty), true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    assert!(world.check_class(derived).is_empty());
}

#[test]
fn identical_override_is_accepted() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", spanned(int_ty), true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    assert!(world.check_class(derived).is_empty());
}

#[test]
fn widening_function_return_type_is_reported() {
    let mut world = World::new();

    let number = world.class("Number", vec![], vec![]);
    let number_ty = world.types.class(number, vec![], false);
    let int = world.class("Int", vec![number_ty], vec![]);
    let int_ty = world.types.class(int, vec![], false);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", spanned(number_ty), true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    let diagnostics = world.check_class(derived);
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics[0];
    assert_eq!(diag.code, diagnostic_codes::RETURN_TYPE_MISMATCH_ON_OVERRIDE);
    assert_eq!(diag.file, FILE);
    assert_eq!(diag.start, 10);
    assert_eq!(diag.length, 10);
    assert_eq!(
        diag.message_text,
        "Return type 'Number' is not a subtype of the return type of overridden member 'Base.f'."
    );
}

#[test]
fn nullable_widening_is_reported() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let nullable_int_ty = world.types.class(int, vec![], true);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", spanned(nullable_int_ty), true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    let diagnostics = world.check_class(derived);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::RETURN_TYPE_MISMATCH_ON_OVERRIDE
    );
    assert!(diagnostics[0].message_text.contains("'Int?'"));
}

#[test]
fn readonly_property_mismatch_uses_property_code() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let base_members = vec![world.property("x", spanned(int_ty), false, false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.property("x", spanned(str_ty), true, false)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    let diagnostics = world.check_class(derived);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::PROPERTY_TYPE_MISMATCH_ON_OVERRIDE
    );
    assert_eq!(
        diagnostics[0].message_text,
        "Type 'Str' is not a subtype of the type of overridden property 'Base.x'."
    );
}

#[test]
fn mutable_property_mismatch_uses_var_code() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let base_members = vec![world.property("x", spanned(int_ty), false, true)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.property("x", spanned(str_ty), true, true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    let diagnostics = world.check_class(derived);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::VAR_TYPE_MISMATCH_ON_OVERRIDE
    );
    assert_eq!(
        diagnostics[0].message_text,
        "Var type 'Str' is not a subtype of the type of overridden var 'Base.x'."
    );
}

#[test]
fn members_not_marked_override_are_not_checked() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    // Shadowing without the override marker is someone else's diagnostic.
    let derived_members = vec![world.function("f", spanned(str_ty), false)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    assert!(world.check_class(derived).is_empty());
}

#[test]
fn violation_without_source_span_is_dropped() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", spanless(str_ty), true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    assert!(world.check_class(derived).is_empty());
}

#[test]
fn one_diagnostic_per_member_naming_the_first_violated_base() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let bool_ = world.class("Bool", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let bool_ty = world.types.class(bool_, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let a_members = vec![world.function("f", spanned(int_ty), false)];
    let a = world.class("A", vec![], a_members);
    let b_members = vec![world.function("f", spanned(bool_ty), false)];
    let b = world.class("B", vec![], b_members);
    let a_ty = world.types.class(a, vec![], false);
    let b_ty = world.types.class(b, vec![], false);

    // Both A.f and B.f are violated; only the first in supertype order is
    // reported.
    let c_members = vec![world.function("f", spanned(str_ty), true)];
    let c = world.class("C", vec![a_ty, b_ty], c_members);

    let diagnostics = world.check_class(c);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message_text.contains("'A.f'"));
}

#[test]
fn each_offending_member_is_reported_separately() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let base_members = vec![
        world.function("f", spanned(int_ty), false),
        world.property("x", spanned(int_ty), false, false),
    ];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![
        world.function("f", spanned(str_ty), true),
        world.property("x", spanned(str_ty), true, false),
    ];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    let diagnostics = world.check_class(derived);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::RETURN_TYPE_MISMATCH_ON_OVERRIDE
    );
    assert_eq!(
        diagnostics[1].code,
        diagnostic_codes::PROPERTY_TYPE_MISMATCH_ON_OVERRIDE
    );
}

#[test]
fn constructors_and_nested_classes_are_ignored() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);

    let base_members = vec![world.constructor(), world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![
        world.constructor(),
        kyn_binder::MemberDecl::NestedClass(int),
        world.function("f", spanned(int_ty), true),
    ];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    assert!(world.check_class(derived).is_empty());
}

#[test]
fn checking_is_idempotent() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let str_ = world.class("Str", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);
    let str_ty = world.types.class(str_, vec![], false);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", spanned(str_ty), true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    let first = world.check_class(derived);
    let second = world.check_class(derived);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn implicit_override_type_is_not_checked() {
    let mut world = World::new();

    let int = world.class("Int", vec![], vec![]);
    let int_ty = world.types.class(int, vec![], false);

    let base_members = vec![world.function("f", spanned(int_ty), false)];
    let base = world.class("Base", vec![], base_members);
    let base_class_ty = world.types.class(base, vec![], false);

    let derived_members = vec![world.function("f", kyn_binder::TypeRef::Implicit, true)];
    let derived = world.class("Derived", vec![base_class_ty], derived_members);

    assert!(world.check_class(derived).is_empty());
}

//! Hand-written interface tables shared by the unit tests.

use polymethod_core::{Interface, InterfaceDescriptor, MethodDescriptor, ParamType};
use std::sync::LazyLock;

pub(crate) struct MockTarget;

impl Interface for MockTarget {
    fn descriptor() -> &'static InterfaceDescriptor {
        static TABLE: LazyLock<InterfaceDescriptor> = LazyLock::new(|| {
            InterfaceDescriptor::builder::<MockTarget>("MockTarget")
                .method(
                    "string_double_string_return",
                    vec![ParamType::of::<String>(), ParamType::of::<f64>()],
                    ParamType::of::<String>(),
                )
                .method("string_return", vec![], ParamType::of::<String>())
                .method("boolean_return", vec![], ParamType::of::<bool>())
                .method(
                    "boolean_boolean_return",
                    vec![ParamType::of::<bool>()],
                    ParamType::of::<bool>(),
                )
                .method("noop", vec![], ParamType::of::<()>())
                .method("throws_error", vec![], ParamType::of::<()>())
                .method("overloaded", vec![], ParamType::of::<()>())
                .method("overloaded", vec![], ParamType::of::<u32>())
                .method("overloaded", vec![ParamType::of::<u32>()], ParamType::of::<()>())
                .build()
        });
        &TABLE
    }
}

pub(crate) struct OtherTarget;

impl Interface for OtherTarget {
    fn descriptor() -> &'static InterfaceDescriptor {
        static TABLE: LazyLock<InterfaceDescriptor> = LazyLock::new(|| {
            InterfaceDescriptor::builder::<OtherTarget>("OtherTarget")
                .method("byte_value", vec![], ParamType::of::<u8>())
                .method("noop", vec![], ParamType::of::<()>())
                .build()
        });
        &TABLE
    }
}

/// The first method of `I` called `name`.
pub(crate) fn method<I: Interface>(name: &str) -> &'static MethodDescriptor {
    I::descriptor()
        .overloads(name)
        .next()
        .unwrap_or_else(|| panic!("{} declares no method {name}", I::descriptor().name()))
}

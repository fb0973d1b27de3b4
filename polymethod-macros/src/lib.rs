//! Procedural macros for polymethod.
//!
//! - `#[interface]` - Generates the metadata table and a forwarding proxy for a trait

use proc_macro::TokenStream;

mod interface;

/// Turn a trait into a polymethod interface.
///
/// Generates, next to the unchanged trait:
///
/// - `impl polymethod::Interface for dyn Trait`, a lazily built metadata
///   table listing every method with its parameter and return types
/// - `impl polymethod::Proxied for dyn Trait`
/// - `TraitProxy`, a struct implementing the trait by forwarding each call
///   to a `polymethod::Dispatch`
///
/// A trait extending another interface, or any trait besides `Send`, `Sync`
/// and `Unpin`, only gets the metadata table: a generated proxy could not
/// implement the supertrait, and `proxy = "..."` is rejected for it. Such an
/// interface is distinct from its supertrait; a registry for one never
/// implements the other.
///
/// Every method must take `&self` and owned arguments, have no generic
/// parameters, and return `Result<T, E>` with `E: From<polymethod::InvokeError>`.
///
/// # Attributes
///
/// - `name = "..."`: display name of the interface (defaults to the trait name)
/// - `proxy = "..."`: name of the generated proxy struct
///
/// # Example
///
/// ```rust,ignore
/// #[polymethod::interface]
/// pub trait Greeter: Send + Sync {
///     fn greet(&self, name: String) -> Result<String, BoxError>;
///     fn reset(&self) -> Result<(), BoxError>;
/// }
///
/// let greeter: Box<dyn Greeter> = RegistryBuilder::for_interface::<dyn Greeter>()
///     .with_method_params("greet", &[ParamType::of::<String>()], handler)?
///     .build_proxy::<dyn Greeter>()?;
/// ```
#[proc_macro_attribute]
pub fn interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    interface::interface_impl(attr, item)
}

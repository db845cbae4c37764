//! Declarative helpers shared by the reqdash apps.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web as __actix_web;

/// Declare route modules and handlers and generate a `routes` function that
/// registers all of them on an actix `ServiceConfig`.
///
/// Every item ends with a comma:
/// - `mod name,` declares `mod name;` and calls `name::routes(cfg)`
/// - `route handler,` registers a handler produced by an actix route macro
///
/// ```ignore
/// macros_utils::routes! {
///     mod fetch,
///     route health_route,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    (@modules) => {};
    (@modules mod $name:ident, $($rest:tt)*) => {
        mod $name;
        $crate::routes!(@modules $($rest)*);
    };
    (@modules route $name:ident, $($rest:tt)*) => {
        $crate::routes!(@modules $($rest)*);
    };

    (@register $cfg:ident;) => {};
    (@register $cfg:ident; mod $name:ident, $($rest:tt)*) => {
        $name::routes($cfg);
        $crate::routes!(@register $cfg; $($rest)*);
    };
    (@register $cfg:ident; route $name:ident, $($rest:tt)*) => {
        $cfg.service($name);
        $crate::routes!(@register $cfg; $($rest)*);
    };

    ($($items:tt)*) => {
        $crate::routes!(@modules $($items)*);

        /// Register every route declared in this module
        pub fn routes(cfg: &mut $crate::__actix_web::web::ServiceConfig) {
            $crate::routes!(@register cfg; $($items)*);
        }
    };
}

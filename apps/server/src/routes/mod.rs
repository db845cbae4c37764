macros_utils::routes! {
    mod health,
    mod fetch,
    mod parse,
    mod requests,
}

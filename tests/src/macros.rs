/// A manager builder with the given models registered.
#[macro_export]
macro_rules! models {
    (
        $( $model:ident ),*
    ) => {{
        let mut builder = docmap::Manager::builder();
        $( builder.register::<$model>(); )*
        builder
    }};
}

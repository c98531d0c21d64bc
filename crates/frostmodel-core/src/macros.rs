// record
/// Build a fresh, unfrozen `Record` from `key => value` pairs.
/// Values go through `Value::from`, so records, lists and model instances
/// can be nested directly.
#[macro_export]
macro_rules! record {
    () => {
        $crate::value::Record::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {
        <$crate::value::Record as ::std::iter::FromIterator<(
            ::std::string::String,
            $crate::value::Value,
        )>>::from_iter([
            $( (::std::string::String::from($key), $crate::value::Value::from($value)) ),+
        ])
    };
}

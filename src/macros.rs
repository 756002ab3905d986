/// Builds a [`VmxMap`](crate::VmxMap) from `key => value` pairs.
///
/// Values can be any expression implementing `ToString`; keys are taken verbatim.
///
/// # Examples
///
/// ```rust
/// use serde_vmx::vmx;
///
/// let map = vmx! {
///     ".encoding" => "UTF-8",
///     "memsize" => 2048,
///     "ethernet0.present" => true,
/// };
///
/// assert_eq!(map.get("memsize"), Some("2048"));
/// assert_eq!(
///     map.to_string(),
///     ".encoding = \"UTF-8\"\nmemsize = \"2048\"\nethernet0.present = \"true\"\n"
/// );
/// ```
#[macro_export]
macro_rules! vmx {
    () => {
        $crate::VmxMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::VmxMap::new();
        $(
            map.insert(::std::string::ToString::to_string(&$key), ::std::string::ToString::to_string(&$value));
        )+
        map
    }};
}

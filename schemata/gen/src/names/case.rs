//! Word splitting and case conversion.
//!
//! Every conversion is a pure function of its input: splitting first breaks
//! the raw key on anything that is not a letter or digit, then splits each
//! chunk on CamelCase boundaries.

/// Splits a raw key into words.
///
/// ## Examples
///
/// ```
/// use schemata_gen::names::case::split_words;
///
/// assert_eq!(split_words("getPetById"), vec!["get", "Pet", "By", "Id"]);
/// assert_eq!(split_words("HTTPClient"), vec!["HTTP", "Client"]);
/// assert_eq!(split_words("x-trace_id"), vec!["x", "trace", "id"]);
/// assert_eq!(split_words("Get /pets/{id}"), vec!["Get", "pets", "id"]);
/// ```
pub fn split_words(raw: &str) -> Vec<String> {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_camel_case)
        .collect()
}

/// Splits a CamelCase chunk into individual words.
///
/// - "OllamaNative" -> ["Ollama", "Native"]
/// - "OpenAI" -> ["Open", "AI"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "v2Api" -> ["v2", "Api"]
fn split_camel_case(chunk: &str) -> Vec<String> {
    let chars: Vec<char> = chunk.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let is_new_word = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if is_new_word && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Converts a raw key to PascalCase.
///
/// ```
/// use schemata_gen::names::case::to_pascal_case;
///
/// assert_eq!(to_pascal_case("name"), "Name");
/// assert_eq!(to_pascal_case("pet_id"), "PetId");
/// assert_eq!(to_pascal_case("OpenAI"), "OpenAi");
/// ```
pub fn to_pascal_case(raw: &str) -> String {
    split_words(raw)
        .iter()
        .map(|word| capitalize_first(&word.to_lowercase()))
        .collect()
}

/// Converts a raw key to snake_case.
///
/// ```
/// use schemata_gen::names::case::to_snake_case;
///
/// assert_eq!(to_snake_case("petId"), "pet_id");
/// assert_eq!(to_snake_case("X-Trace-Id"), "x_trace_id");
/// assert_eq!(to_snake_case("HTTPClient"), "http_client");
/// ```
pub fn to_snake_case(raw: &str) -> String {
    split_words(raw)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

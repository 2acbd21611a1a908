//! CSS classes attached to rendered elements.

/// Class names for each element the renderer emits.
///
/// An empty string means the element is written without a `class`
/// attribute. The default is [`ClassMap::plain`], which produces bare
/// tags and leaves styling to a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    /// Heading classes, index 0 is `h1`.
    pub headings: [String; 6],
    pub paragraph: String,
    pub ordered_list: String,
    pub unordered_list: String,
    pub list_item: String,
    pub table: String,
    pub header_cell: String,
    pub body_cell: String,
    pub pre: String,
    /// Extra classes for the `code` element inside `pre`, after the
    /// `language-*` class.
    pub code_block: String,
    pub inline_code: String,
    pub strong: String,
    pub link: String,
}

impl ClassMap {
    /// Bare tags with no class attributes.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Tailwind utility classes for pages styled with the Tailwind CDN.
    pub fn tailwind() -> Self {
        Self {
            headings: [
                "text-4xl font-bold mt-8 mb-4".into(),
                "text-3xl font-semibold mt-8 mb-4".into(),
                "text-2xl font-semibold mt-8 mb-4".into(),
                "text-xl font-semibold mt-6 mb-3".into(),
                "text-xl font-semibold mt-6 mb-3".into(),
                "text-lg font-semibold mt-6 mb-3".into(),
            ],
            paragraph: "my-4 leading-relaxed".into(),
            ordered_list: "list-decimal list-inside my-4 space-y-2 ml-4".into(),
            unordered_list: "list-disc list-inside my-4 space-y-2 ml-4".into(),
            list_item: "ml-6 mb-2".into(),
            table: "border-collapse border border-gray-300 w-full my-6".into(),
            header_cell: "border border-gray-300 px-4 py-2 text-left font-semibold".into(),
            body_cell: "border border-gray-300 px-4 py-2".into(),
            pre: "bg-gray-100 dark:bg-gray-800 p-4 rounded-lg overflow-x-auto my-4".into(),
            code_block: String::new(),
            inline_code: "bg-gray-100 dark:bg-gray-800 px-1.5 py-0.5 rounded text-sm font-mono"
                .into(),
            strong: "font-semibold".into(),
            link: "text-blue-600 dark:text-blue-400 hover:underline".into(),
        }
    }

    /// Class for a heading level in `1..=6`; out of range levels are clamped.
    pub fn heading(&self, level: usize) -> &str {
        &self.headings[level.clamp(1, 6) - 1]
    }
}

/// Formats a ` class="..."` attribute, or nothing for an empty class.
pub(super) fn class_attr(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", class)
    }
}

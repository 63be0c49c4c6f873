use drawnodes_core::color::{PAIRED_PALETTE, normalize_color};

/// Trace colors: a caller palette when one is given, otherwise the built-in Paired palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    custom: Option<Vec<String>>,
}

impl Palette {
    /// An empty custom list falls back to the built-in palette.
    pub fn new(custom: Option<&[String]>) -> Self {
        let custom = custom
            .filter(|c| !c.is_empty())
            .map(|c| c.iter().map(|v| normalize_color(v)).collect());
        Self { custom }
    }

    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Color for position `index`, cycling when the palette is shorter.
    pub fn color(&self, index: usize) -> String {
        match &self.custom {
            Some(colors) => colors[index % colors.len()].clone(),
            None => PAIRED_PALETTE[index % PAIRED_PALETTE.len()].to_string(),
        }
    }
}

/// Position of `col` among the sorted `columns`; columns not present map to 0.
pub fn color_index(columns: &[usize], col: usize) -> usize {
    columns.binary_search(&col).unwrap_or(0)
}

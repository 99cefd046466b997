/// Row-major read access shared by the organized point grid and label maps.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Rows from top to bottom.
    fn rows(&self) -> impl Iterator<Item = &[Self::Pixel]> + '_ {
        (0..self.height()).map(move |y| self.row(y))
    }

    /// Horizontal slice `[x0, x0 + len)` of row `y`.
    fn row_span(&self, y: usize, x0: usize, len: usize) -> &[Self::Pixel] {
        &self.row(y)[x0..x0 + len]
    }
}

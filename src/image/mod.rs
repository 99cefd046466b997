pub mod depth;
pub mod io;
pub mod labels;
pub mod traits;

pub use self::depth::{is_valid_point, DepthGrid, INVALID_POINT};
pub use self::labels::LabelMap;
pub use self::traits::ImageView;

pub mod director;
pub mod external;
pub mod genre;
pub mod ids;
pub mod movie;

pub use director::{Director, DirectorInput};
pub use external::{MovieDetail, SearchHit};
pub use genre::Genre;
pub use ids::{DirectorId, MovieId};
pub use movie::{Movie, MovieInput, PLACEHOLDER_POSTER};

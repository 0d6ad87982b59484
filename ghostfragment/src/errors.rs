#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Got an atomic number for which no covalent radius is tabulated
    UnsupportedElement(usize),
    /// The connectivity of the system can not be handled by the algorithm
    InvalidTopology(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Error related to reading structure files
    Chemfiles(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::UnsupportedElement(z) => write!(f, "no covalent radius available for atomic number {}", z),
            Error::InvalidTopology(e) => write!(f, "invalid topology: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Chemfiles(e) => write!(f, "chemfiles error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::UnsupportedElement(_) |
            Error::InvalidTopology(_) |
            Error::Chemfiles(_) => None,
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

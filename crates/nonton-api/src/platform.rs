/// Every upstream catalog the aggregator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    DramaBox,
    ReelShort,
    NetShort,
    Melolo,
    FlickReels,
    FreeReels,
    Anime,
    Komik,
}

impl Platform {
    /// Path segment appended to the upstream base URL.
    pub fn segment(self) -> &'static str {
        match self {
            Self::DramaBox => "dramabox",
            Self::ReelShort => "reelshort",
            Self::NetShort => "netshort",
            Self::Melolo => "melolo",
            Self::FlickReels => "flickreels",
            Self::FreeReels => "freereels",
            Self::Anime => "anime",
            Self::Komik => "komik",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DramaBox => write!(f, "DramaBox"),
            Self::ReelShort => write!(f, "ReelShort"),
            Self::NetShort => write!(f, "NetShort"),
            Self::Melolo => write!(f, "Melolo"),
            Self::FlickReels => write!(f, "FlickReels"),
            Self::FreeReels => write!(f, "FreeReels"),
            Self::Anime => write!(f, "Anime"),
            Self::Komik => write!(f, "Komik"),
        }
    }
}

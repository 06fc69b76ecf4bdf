use std::{fmt::Display, str::FromStr};

use rd::RdPoint;
use serde::{Deserialize, Serialize};

/// Rectangle in RD coordinates, each side rounded to centimetres.
///
/// Always satisfies `xmin <= xmax` and `ymin <= ymax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl BoundingBox {
    /// Box spanned by two opposite corners, given in any order.
    pub fn from_corners(a: RdPoint, b: RdPoint) -> Self {
        Self {
            xmin: round2(a.x.min(b.x)),
            ymin: round2(a.y.min(b.y)),
            xmax: round2(a.x.max(b.x)),
            ymax: round2(a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Query parameters understood by the BAG API.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("minx", self.xmin.to_string()),
            ("miny", self.ymin.to_string()),
            ("maxx", self.xmax.to_string()),
            ("maxy", self.ymax.to_string()),
        ]
    }

    pub fn api_format(&self) -> String {
        format!(
            "bbox={},{},{},{}",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected \"xmin,ymin,xmax,ymax\", got: {0}")]
pub struct ParseBboxError(pub String);

impl FromStr for BoundingBox {
    type Err = ParseBboxError;

    /// Accepts the same text the download panel shows, commas with optional spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseBboxError(s.into()))?;

        match values.as_slice() {
            [x1, y1, x2, y2] if values.iter().all(|v| v.is_finite()) => Ok(Self::from_corners(
                RdPoint::new(*x1, *y1),
                RdPoint::new(*x2, *y2),
            )),
            _ => Err(ParseBboxError(s.into())),
        }
    }
}

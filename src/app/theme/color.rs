/// A parsed color token. `alpha` is 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `RRGGBB`, `rgb(r, g, b)` or
    /// `rgba(r, g, b, a)`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(args) = token
            .strip_prefix("rgba(")
            .or_else(|| token.strip_prefix("rgb("))
        {
            return Self::parse_functional(args.strip_suffix(')')?);
        }
        Self::parse_hex(token.strip_prefix('#').unwrap_or(token))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let expand = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::opaque(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                alpha: f32::from(channel(6)?) / 255.0,
            }),
            _ => None,
        }
    }

    fn parse_functional(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let (rgb, alpha) = match parts.as_slice() {
            [r, g, b] => ([*r, *g, *b], 1.0),
            [r, g, b, a] => ([*r, *g, *b], a.parse::<f32>().ok()?.clamp(0.0, 1.0)),
            _ => return None,
        };
        let [r, g, b] = rgb;
        Some(Self {
            r: r.parse().ok()?,
            g: g.parse().ok()?,
            b: b.parse().ok()?,
            alpha,
        })
    }

    /// Composite this color over an opaque background.
    pub fn over(&self, background: Rgba) -> Rgba {
        let mix = |fg: u8, bg: u8| {
            (f32::from(fg) * self.alpha + f32::from(bg) * (1.0 - self.alpha)).round() as u8
        };
        Rgba::opaque(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    /// `RRGGBB` without the leading `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use qrcode::QrCode;
use qrcode::render::unicode;

use crate::error::QrKitResult;
use crate::qr::types::{EcLevel, QrOptions, Rgb};

/// Module grid produced by the encoder
pub struct QrMatrix {
    code: QrCode,
    width: usize,
    dark: Vec<bool>,
}

pub fn encode(text: &str, ec_level: EcLevel) -> QrKitResult<QrMatrix> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level.into())?;
    let width = code.width();
    let dark = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    Ok(QrMatrix { code, width, dark })
}

impl QrMatrix {
    /// Number of modules per side, without quiet zone
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.width && col < self.width && self.dark[row * self.width + col]
    }

    /// Pixels per module so the symbol plus margin fits in `options.size`
    pub fn module_size(&self, options: &QrOptions) -> u32 {
        let modules = self.width as u32 + 2 * options.margin;
        (options.size / modules).max(1)
    }

    pub fn to_rgba(&self, options: &QrOptions) -> RgbaImage {
        let module_sz = self.module_size(options);
        let qz_sz = options.margin * module_sz;
        let qr_sz = self.width as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let fg = rgba(options.foreground);
        let bg = rgba(options.background);

        ImageBuffer::from_fn(total_sz, total_sz, |x, y| {
            if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
                return bg;
            }
            let r = ((y - qz_sz) / module_sz) as usize;
            let c = ((x - qz_sz) / module_sz) as usize;
            if self.is_dark(r, c) { fg } else { bg }
        })
    }

    pub fn to_png(&self, options: &QrOptions) -> QrKitResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.to_rgba(options).write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Vector rendering: one path of unit squares in module coordinates
    pub fn to_svg(&self, options: &QrOptions) -> String {
        let modules = self.width as u32 + 2 * options.margin;
        let pixels = modules * self.module_size(options);

        let mut path = String::new();
        for r in 0..self.width {
            for c in 0..self.width {
                if self.is_dark(r, c) {
                    let x = c as u32 + options.margin;
                    let y = r as u32 + options.margin;
                    path.push_str(&format!("M{x} {y}h1v1h-1z"));
                }
            }
        }

        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ",
                "width=\"{px}\" height=\"{px}\" viewBox=\"0 0 {m} {m}\" ",
                "shape-rendering=\"crispEdges\">\n",
                "<rect width=\"{m}\" height=\"{m}\" fill=\"{bg}\"/>\n",
                "<path d=\"{path}\" fill=\"{fg}\"/>\n",
                "</svg>\n"
            ),
            px = pixels,
            m = modules,
            bg = options.background.to_hex(),
            fg = options.foreground.to_hex(),
            path = path,
        )
    }

    /// Half-block rendering for the terminal preview
    pub fn to_terminal_lines(&self) -> Vec<String> {
        let string = self.code.render::<unicode::Dense1x2>().build();
        string.lines().map(|s| s.to_string()).collect()
    }
}

fn rgba(color: Rgb) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, 255])
}

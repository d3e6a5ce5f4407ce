//! In-memory PDF fixtures for loader, pipeline and handler tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

pub struct TestPage {
    pub text: String,
    pub image: bool,
    /// All lines in one `BT`/`ET` object, moved down with `Td`, the way
    /// word processors usually write body text.
    pub single_block: bool,
}

impl TestPage {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            image: false,
            single_block: false,
        }
    }

    pub fn single_block(text: &str) -> Self {
        Self {
            single_block: true,
            ..Self::text(text)
        }
    }

    pub fn with_image(mut self) -> Self {
        self.image = true;
        self
    }
}

fn line_block_operations(text: &str) -> Vec<Operation> {
    let mut operations = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let y = 740 - (i as i64) * 14;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
        operations.push(Operation::new("Td", vec![72.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

fn single_block_operations(text: &str) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("Td", vec![72.into(), 740.into()]),
    ];
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Builds a Courier PDF. By default every line is its own text object;
/// see [`TestPage::single_block`] for the other layout.
pub fn build_pdf(pages: &[TestPage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = if page.single_block {
            single_block_operations(&page.text)
        } else {
            line_block_operations(&page.text)
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));

        let mut xobjects = Dictionary::new();
        if page.image {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![0u8],
            ));
            xobjects.set("Im1", image_id);
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
                "XObject" => xobjects,
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("pdf saves");
    buf
}

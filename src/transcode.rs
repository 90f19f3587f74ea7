use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use vocab::{
    Item, decode_binary, decode_text, encode_binary, encode_text, encode_text_document,
};

use crate::config::{CodecConfig, Format};

#[derive(Clone, Debug)]
pub(crate) struct Options {
    pub(crate) from: Format,
    pub(crate) to: Format,
    pub(crate) context: bool,
    pub(crate) flatten: bool,
    pub(crate) clean: bool,
    /// Write the merged audience instead of the item itself.
    pub(crate) recipients: bool,
}

impl From<&CodecConfig> for Options {
    fn from(config: &CodecConfig) -> Self {
        Options {
            from: config.input,
            to: config.output,
            context: config.context,
            flatten: config.flatten,
            clean: config.clean,
            recipients: false,
        }
    }
}

/// JSON documents start with an object, an array or a bare IRI string.
/// Everything else is taken as a CBOR property map.
pub(crate) fn sniff(bytes: &[u8]) -> Format {
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{' | b'[' | b'"') => Format::Json,
        _ => Format::Cbor,
    }
}

fn resolve(format: Format, bytes: &[u8]) -> Format {
    match format {
        Format::Auto => sniff(bytes),
        format => format,
    }
}

pub(crate) fn decode(bytes: &[u8], format: Format) -> Result<Option<Item>> {
    let item = match resolve(format, bytes) {
        Format::Cbor => decode_binary(bytes)?,
        _ => decode_text(bytes)?,
    };
    Ok(item)
}

/// Output format for an input already read as `from`. `auto` writes the
/// other format.
fn target(options: &Options, from: Format) -> Format {
    match options.to {
        Format::Auto if from == Format::Cbor => Format::Json,
        Format::Auto => Format::Cbor,
        to => to,
    }
}

pub(crate) fn transcode(bytes: &[u8], options: &Options) -> Result<Vec<u8>> {
    let from = resolve(options.from, bytes);
    let to = target(options, from);
    let Some(mut item) = decode(bytes, from)? else {
        debug!(?from, "input holds no item");
        return Ok(match to {
            Format::Cbor => Vec::new(),
            _ => b"null".to_vec(),
        });
    };
    info!(?from, id = %item.id(), kind = %item.kind(), "decoded");

    if options.flatten {
        item = item.flatten();
    }
    if options.recipients {
        let Some(object) = item.as_object_mut() else {
            bail!("{} has no addressing properties", item.kind());
        };
        item = Item::from(object.recipients());
    }
    // after recipients so blind recipients still count towards the audience
    if options.clean {
        item.clean();
    }

    let out = match to {
        Format::Cbor => encode_binary(&item)?,
        _ if options.context => encode_text_document(&item)?,
        _ => encode_text(&item)?,
    };
    debug!(?to, len = out.len(), "encoded");
    Ok(out)
}

pub(crate) fn run(input: &Path, output: Option<&Path>, options: &Options) -> Result<()> {
    let bytes =
        fs::read(input).with_context(|| format!("unable to read {}", input.display()))?;
    let to = target(options, resolve(options.from, &bytes));
    let out = transcode(&bytes, options)
        .with_context(|| format!("unable to transcode {}", input.display()))?;
    match output {
        Some(path) => {
            fs::write(path, &out).with_context(|| format!("unable to write {}", path.display()))?
        }
        None => write_stream(&mut io::stdout().lock(), &out, to)?,
    }
    Ok(())
}

/// JSON gets a trailing newline; CBOR readers reject trailing bytes.
fn write_stream(w: &mut impl Write, out: &[u8], to: Format) -> io::Result<()> {
    w.write_all(out)?;
    if to == Format::Json {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;
    use vocab::{Iri, ItemCollection};

    use super::*;

    const CREATE: &str = r#"{
        "@context": "https://www.w3.org/ns/activitystreams",
        "id": "https://example.com/activities/1",
        "type": "Create",
        "actor": {"id": "https://example.com/users/alice", "type": "Person"},
        "to": ["https://example.com/users/bob"],
        "cc": ["https://example.com/users/bob", "https://example.com/users/carol"],
        "bcc": ["https://example.com/users/dave"],
        "object": {
            "id": "https://example.com/notes/1",
            "type": "Note",
            "content": "hello",
            "bto": ["https://example.com/users/erin"]
        }
    }"#;

    fn options(from: Format, to: Format) -> Options {
        Options {
            from,
            to,
            context: false,
            flatten: false,
            clean: false,
            recipients: false,
        }
    }

    #[test]
    fn sniff_first_significant_byte() {
        assert_eq!(sniff(b"  \n{}"), Format::Json);
        assert_eq!(sniff(b"[\"https://example.com\"]"), Format::Json);
        assert_eq!(sniff(b"\"https://example.com\""), Format::Json);
        assert_eq!(sniff(&[0xa1, 0x62]), Format::Cbor);
        assert_eq!(sniff(b""), Format::Cbor);
    }

    #[test]
    fn json_to_cbor_and_back() -> Result<()> {
        let cbor = transcode(CREATE.as_bytes(), &options(Format::Json, Format::Cbor))?;
        let from_cbor = decode(&cbor, Format::Auto)?;
        let from_json = decode(CREATE.as_bytes(), Format::Auto)?;
        assert_eq!(from_cbor, from_json);

        let json = transcode(&cbor, &options(Format::Auto, Format::Json))?;
        assert_eq!(decode(&json, Format::Json)?, from_json);
        Ok(())
    }

    #[test]
    fn auto_output_switches_format() -> Result<()> {
        let cbor = transcode(CREATE.as_bytes(), &options(Format::Auto, Format::Auto))?;
        assert_eq!(sniff(&cbor), Format::Cbor);
        let json = transcode(&cbor, &options(Format::Auto, Format::Auto))?;
        assert_eq!(sniff(&json), Format::Json);
        Ok(())
    }

    #[test]
    fn streamed_cbor_has_no_trailing_newline() -> Result<()> {
        let opts = options(Format::Json, Format::Auto);
        let to = target(&opts, Format::Json);
        assert_eq!(to, Format::Cbor);

        let mut stream = Vec::new();
        write_stream(&mut stream, &transcode(CREATE.as_bytes(), &opts)?, to)?;
        assert_eq!(decode(&stream, Format::Cbor)?, decode(CREATE.as_bytes(), Format::Json)?);

        let to = target(&opts, Format::Cbor);
        assert_eq!(to, Format::Json);
        let mut stream = Vec::new();
        write_stream(&mut stream, b"null", to)?;
        assert_eq!(stream, b"null\n");
        Ok(())
    }

    #[test]
    fn clean_strips_blind_recipients() -> Result<()> {
        let mut opts = options(Format::Json, Format::Json);
        opts.clean = true;
        let json = transcode(CREATE.as_bytes(), &opts)?;
        let text = String::from_utf8(json)?;
        assert!(!text.contains("bcc"));
        assert!(!text.contains("bto"));
        assert!(text.contains("https://example.com/users/carol"));
        Ok(())
    }

    #[test]
    fn flatten_replaces_embedded_records() -> Result<()> {
        let mut opts = options(Format::Json, Format::Json);
        opts.flatten = true;
        let json = transcode(CREATE.as_bytes(), &opts)?;
        let Some(Item::Activity(activity)) = decode(&json, Format::Json)? else {
            panic!("expected an activity");
        };
        assert_eq!(
            activity.actor,
            Some(Item::from(Iri::from("https://example.com/users/alice")))
        );
        assert_eq!(
            activity.object,
            Some(Item::from(Iri::from("https://example.com/notes/1")))
        );
        Ok(())
    }

    #[test]
    fn recipients_are_merged_once() -> Result<()> {
        let mut opts = options(Format::Json, Format::Json);
        opts.recipients = true;
        opts.clean = true;
        let json = transcode(CREATE.as_bytes(), &opts)?;
        let Some(Item::ItemCollection(recipients)) = decode(&json, Format::Json)? else {
            panic!("expected a list of recipients");
        };
        let expected: ItemCollection = [
            "https://example.com/users/bob",
            "https://example.com/users/carol",
            "https://example.com/users/dave",
        ]
        .into_iter()
        .map(|iri| Item::from(Iri::from(iri)))
        .collect();
        assert!(recipients.equals(&expected));
        Ok(())
    }

    #[test]
    fn recipients_of_a_bare_iri_fail() {
        let mut opts = options(Format::Json, Format::Json);
        opts.recipients = true;
        assert!(transcode(b"\"https://example.com/a\"", &opts).is_err());
    }

    #[test]
    fn empty_input_writes_nothing() -> Result<()> {
        assert_eq!(transcode(b"{}", &options(Format::Json, Format::Json))?, b"null");
        assert!(transcode(b"null", &options(Format::Json, Format::Cbor))?.is_empty());
        Ok(())
    }

    #[test]
    fn document_context_is_optional() -> Result<()> {
        let mut opts = options(Format::Json, Format::Json);
        let bare = String::from_utf8(transcode(CREATE.as_bytes(), &opts)?)?;
        assert!(!bare.contains("@context"));
        opts.context = true;
        let document = String::from_utf8(transcode(CREATE.as_bytes(), &opts)?)?;
        assert!(document.starts_with("{\"@context\""));
        Ok(())
    }

    #[test]
    fn run_writes_output_file() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("create.json");
        let output = dir.path().join("create.cbor");
        fs::write(&input, CREATE)?;

        run(&input, Some(&output), &options(Format::Auto, Format::Cbor))?;

        let cbor = fs::read(&output)?;
        assert_eq!(decode(&cbor, Format::Cbor)?, decode(CREATE.as_bytes(), Format::Json)?);
        Ok(())
    }

    #[test]
    fn run_reports_missing_input() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing.json");
        assert!(run(&missing, None, &options(Format::Json, Format::Json)).is_err());
        Ok(())
    }
}

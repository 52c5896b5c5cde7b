//! Header and footer specs
//!
//! Verify that every published file starts with the header and ends with the footer.

use crate::prelude::*;

#[test]
fn every_file_is_bracketed() {
    let dirs = Dirs::new();
    let mut stream = FileStream::open(
        dirs.config("sitemap{count}.xml")
            .header("<urlset>\n")
            .footer("</urlset>\n")
            .rotate_after(2),
    )
    .unwrap();

    for url in ["a", "b", "c", "d", "e"] {
        stream.write(format!("<url>{url}</url>\n")).unwrap();
    }
    stream.finish().unwrap();

    dirs.published("sitemap0.xml")
        .has_content("<urlset>\n<url>a</url>\n<url>b</url>\n</urlset>\n");
    dirs.published("sitemap1.xml")
        .has_content("<urlset>\n<url>c</url>\n<url>d</url>\n</urlset>\n");
    dirs.published("sitemap2.xml")
        .has_content("<urlset>\n<url>e</url>\n</urlset>\n");
}

#[test]
fn zero_writes_publish_header_plus_footer() {
    let dirs = Dirs::new();
    let stream = FileStream::open(dirs.config("empty.xml").header("<a>").footer("</a>")).unwrap();

    let published = stream.finish().unwrap();

    assert_eq!(published, vec![dirs.public.join("empty.xml")]);
    dirs.published("empty.xml").has_content("<a></a>");
}

#[test]
fn zero_writes_without_bracketing_publish_empty_file() {
    let dirs = Dirs::new();
    let stream = FileStream::open(dirs.config("nothing.txt")).unwrap();

    drop(stream);

    dirs.published("nothing.txt").exists().has_content("");
}

#[test]
fn binary_content_is_written_verbatim() {
    let dirs = Dirs::new();
    let mut stream = FileStream::open(dirs.config("blob.bin")).unwrap();

    stream.write([0u8, 159, 146, 150, 255]).unwrap();
    stream.finish().unwrap();

    let bytes = std::fs::read(dirs.public.join("blob.bin")).unwrap();
    assert_eq!(bytes, vec![0u8, 159, 146, 150, 255]);
}

#[test]
fn non_utf8_header_and_footer_are_written_verbatim() {
    let dirs = Dirs::new();
    let mut stream = FileStream::open(
        dirs.config("frames{count}.bin")
            .header(vec![0xffu8, 0x00])
            .footer(&b"\xfe\x80"[..])
            .rotate_after(1),
    )
    .unwrap();

    stream.write([1u8, 2]).unwrap();
    stream.write([3u8]).unwrap();
    stream.finish().unwrap();

    assert_eq!(
        std::fs::read(dirs.public.join("frames0.bin")).unwrap(),
        vec![0xff, 0x00, 1, 2, 0xfe, 0x80]
    );
    assert_eq!(
        std::fs::read(dirs.public.join("frames1.bin")).unwrap(),
        vec![0xff, 0x00, 3, 0xfe, 0x80]
    );
    assert_eq!(dirs.published_names(), vec!["frames0.bin", "frames1.bin"]);
}

//! Class file parsing (JVMS chapter 4), restricted to what declarations need:
//! names, access flags, supertypes, members, and the `Signature` and
//! `InnerClasses` attributes. Code and other attributes are skipped.

use super::jvm::{JvmClass, JvmMember};
use jsolve_common::limits::MAX_CONSTANT_POOL_ENTRIES;
use jsolve_common::{ResolveError, ResolveResult};

const MAGIC: u32 = 0xCAFE_BABE;

#[derive(Clone, Debug)]
enum Constant {
    Utf8(String),
    /// Index of a `Utf8` entry holding an internal name.
    Class(u16),
    /// Second slot of a `Long` or `Double`, and tags we never read back.
    Other,
}

/// Parse `bytes` as a class file. `source` names the file in errors.
pub fn parse_class_file(bytes: &[u8], source: &str) -> ResolveResult<JvmClass> {
    ClassFileReader::new(bytes, source).read()
}

pub struct ClassFileReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    source: &'a str,
    pool: Vec<Constant>,
}

impl<'a> ClassFileReader<'a> {
    pub fn new(bytes: &'a [u8], source: &'a str) -> Self {
        Self {
            bytes,
            pos: 0,
            source,
            pool: Vec::new(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> ResolveError {
        ResolveError::configuration(
            self.source.to_string(),
            format!("{} (offset {})", reason.into(), self.pos),
        )
    }

    fn take(&mut self, len: usize) -> ResolveResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| self.error("truncated class file"))?;
        let bytes = self.bytes;
        let slice = &bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u1(&mut self) -> ResolveResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u2(&mut self) -> ResolveResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u4(&mut self) -> ResolveResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read(mut self) -> ResolveResult<JvmClass> {
        if self.u4()? != MAGIC {
            return Err(self.error("bad magic number"));
        }
        let _minor = self.u2()?;
        let _major = self.u2()?;
        self.read_constant_pool()?;

        let access = self.u2()?;
        let this_index = self.u2()?;
        let internal_name = self.class_name(this_index)?;
        let super_index = self.u2()?;
        let superclass = if super_index == 0 {
            None
        } else {
            Some(self.class_name(super_index)?)
        };
        let interface_count = self.u2()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            let index = self.u2()?;
            interfaces.push(self.class_name(index)?);
        }
        let fields = self.read_members()?;
        let methods = self.read_members()?;

        let mut class = JvmClass {
            internal_name,
            access,
            superclass,
            interfaces,
            fields,
            methods,
            ..JvmClass::default()
        };
        let attribute_count = self.u2()?;
        for _ in 0..attribute_count {
            let name_index = self.u2()?;
            let len = self.u4()? as usize;
            let attribute = self.utf8(name_index)?.to_string();
            match attribute.as_str() {
                "Signature" => {
                    let index = self.u2()?;
                    class.signature = Some(self.utf8(index)?.to_string());
                }
                "InnerClasses" => self.read_inner_classes(this_index, &mut class)?,
                _ => {
                    self.take(len)?;
                }
            }
        }
        Ok(class)
    }

    fn read_constant_pool(&mut self) -> ResolveResult<()> {
        let count = self.u2()? as usize;
        if count == 0 || count > MAX_CONSTANT_POOL_ENTRIES {
            return Err(self.error(format!("invalid constant pool size {count}")));
        }
        self.pool = Vec::with_capacity(count);
        // Entry 0 is unused.
        self.pool.push(Constant::Other);
        while self.pool.len() < count {
            let tag = self.u1()?;
            let constant = match tag {
                1 => {
                    let len = self.u2()? as usize;
                    let raw = self.take(len)?;
                    let text = decode_modified_utf8(raw)
                        .ok_or_else(|| self.error("malformed modified UTF-8 constant"))?;
                    Constant::Utf8(text)
                }
                7 => Constant::Class(self.u2()?),
                3 | 4 => {
                    self.take(4)?;
                    Constant::Other
                }
                5 | 6 => {
                    self.take(8)?;
                    self.pool.push(Constant::Other);
                    Constant::Other
                }
                8 | 16 | 19 | 20 => {
                    self.take(2)?;
                    Constant::Other
                }
                9 | 10 | 11 | 12 | 17 | 18 => {
                    self.take(4)?;
                    Constant::Other
                }
                15 => {
                    self.take(3)?;
                    Constant::Other
                }
                other => return Err(self.error(format!("unknown constant pool tag {other}"))),
            };
            self.pool.push(constant);
        }
        Ok(())
    }

    fn read_members(&mut self) -> ResolveResult<Vec<JvmMember>> {
        let count = self.u2()?;
        let mut members = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let access = self.u2()?;
            let name_index = self.u2()?;
            let descriptor_index = self.u2()?;
            let mut member = JvmMember {
                name: self.utf8(name_index)?.to_string(),
                access,
                descriptor: self.utf8(descriptor_index)?.to_string(),
                signature: None,
            };
            let attribute_count = self.u2()?;
            for _ in 0..attribute_count {
                let attr_name = self.u2()?;
                let len = self.u4()? as usize;
                if self.utf8(attr_name)? == "Signature" {
                    let index = self.u2()?;
                    member.signature = Some(self.utf8(index)?.to_string());
                } else {
                    self.take(len)?;
                }
            }
            members.push(member);
        }
        Ok(members)
    }

    fn read_inner_classes(&mut self, this_index: u16, class: &mut JvmClass) -> ResolveResult<()> {
        let this_name = self.class_name(this_index)?;
        let count = self.u2()?;
        for _ in 0..count {
            let inner_index = self.u2()?;
            let outer_index = self.u2()?;
            let _inner_name = self.u2()?;
            let inner_access = self.u2()?;
            if inner_index == 0 {
                continue;
            }
            let inner = self.class_name(inner_index)?;
            if inner == this_name {
                class.inner_access = Some(inner_access);
            } else if outer_index != 0 && self.class_name(outer_index)? == this_name {
                class.member_classes.push(inner);
            }
        }
        Ok(())
    }

    fn utf8(&self, index: u16) -> ResolveResult<&str> {
        match self.pool.get(index as usize) {
            Some(Constant::Utf8(text)) => Ok(text),
            _ => Err(self.error(format!("constant #{index} is not Utf8"))),
        }
    }

    fn class_name(&self, index: u16) -> ResolveResult<String> {
        match self.pool.get(index as usize) {
            Some(Constant::Class(name_index)) => Ok(self.utf8(*name_index)?.to_string()),
            _ => Err(self.error(format!("constant #{index} is not a Class"))),
        }
    }
}

/// Class files encode strings in modified UTF-8: `U+0000` as `C0 80` and
/// supplementary characters as a surrogate pair of three-byte sequences.
/// `None` when the bytes are malformed.
fn decode_modified_utf8(raw: &[u8]) -> Option<String> {
    if raw.iter().all(|&b| (0x01..0x80).contains(&b)) {
        return std::str::from_utf8(raw).ok().map(str::to_string);
    }
    let mut units = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let lead = u16::from(raw[i]);
        let (unit, width) = match raw[i] {
            0x01..=0x7F => (lead, 1),
            0xC0..=0xDF => ((lead & 0x1F) << 6 | continuation(raw, i + 1)?, 2),
            0xE0..=0xEF => (
                (lead & 0x0F) << 12 | continuation(raw, i + 1)? << 6 | continuation(raw, i + 2)?,
                3,
            ),
            _ => return None,
        };
        units.push(unit);
        i += width;
    }
    String::from_utf16(&units).ok()
}

fn continuation(raw: &[u8], at: usize) -> Option<u16> {
    raw.get(at)
        .filter(|&&b| b & 0xC0 == 0x80)
        .map(|&b| u16::from(b & 0x3F))
}

//! LibXML2 FFI Wrapper Module
//!
//! This module provides a safe wrapper around the small part of libxml2 needed to read
//! bibxml references: parsing a document from memory and evaluating XPath 1.0 queries
//! against it.
//!
//! ## Resource management
//!
//! - libxml2 is initialised exactly once per process (`std::sync::Once`)
//! - [`XmlDocument`] owns both the `xmlDoc` and its XPath context and frees them on drop
//! - every XPath result object is wrapped and freed on drop, so no `xmlChar*` ever
//!   escapes to Rust code and `xmlFree` is never needed
//!
//! `XmlDocument` holds raw pointers and is therefore neither `Send` nor `Sync`; the
//! pipeline is strictly sequential.

use std::ffi::{CStr, CString};
use std::ptr::NonNull;
use std::sync::Once;

use libc::{c_char, c_int, c_uchar, c_void};

use crate::error::{XmlError, XmlResult};

/// Global initialization flag for libxml2
///
/// libxml2's initialization functions are NOT thread-safe, so we must use
/// std::sync::Once to protect them.
static LIBXML2_INIT: Once = Once::new();

/// Forbid network access while loading documents
const XML_PARSE_NONET: c_int = 1 << 11;
/// Suppress error reports on stderr
const XML_PARSE_NOERROR: c_int = 1 << 5;
/// Suppress warning reports on stderr
const XML_PARSE_NOWARNING: c_int = 1 << 6;

const PARSE_OPTIONS: c_int = XML_PARSE_NONET | XML_PARSE_NOERROR | XML_PARSE_NOWARNING;

/// `xmlXPathObjectType` values
const XPATH_NUMBER: c_int = 3;
const XPATH_STRING: c_int = 4;

// Opaque libxml2 structures
#[repr(C)]
pub struct XmlDoc {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlXPathContext {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlXPathObject {
    pub kind: c_int,
    pub nodesetval: *mut c_void,
    pub boolval: c_int,
    pub floatval: f64,
    pub stringval: *mut c_uchar,
    pub user: *mut c_void,
    pub index: c_int,
    pub user2: *mut c_void,
    pub index2: c_int,
}

// External libxml2 FFI declarations
#[cfg_attr(target_os = "windows", link(name = "libxml2"))]
#[cfg_attr(not(target_os = "windows"), link(name = "xml2"))]
unsafe extern "C" {
    pub fn xmlInitParser();

    // Document parsing
    pub fn xmlReadMemory(
        buffer: *const c_char,
        size: c_int,
        url: *const c_char,
        encoding: *const c_char,
        options: c_int,
    ) -> *mut XmlDoc;
    pub fn xmlFreeDoc(doc: *mut XmlDoc);

    // XPath
    pub fn xmlXPathNewContext(doc: *mut XmlDoc) -> *mut XmlXPathContext;
    pub fn xmlXPathFreeContext(ctxt: *mut XmlXPathContext);
    pub fn xmlXPathEvalExpression(
        expression: *const c_uchar,
        ctxt: *mut XmlXPathContext,
    ) -> *mut XmlXPathObject;
    pub fn xmlXPathFreeObject(obj: *mut XmlXPathObject);
}

fn ensure_initialized() {
    LIBXML2_INIT.call_once(|| unsafe {
        xmlInitParser();
    });
}

/// Owned XPath result, freed on drop
struct XPathResult {
    ptr: NonNull<XmlXPathObject>,
}

impl XPathResult {
    fn object(&self) -> &XmlXPathObject {
        // Safety: the pointer came from xmlXPathEvalExpression and stays valid until drop.
        unsafe { self.ptr.as_ref() }
    }
}

impl Drop for XPathResult {
    fn drop(&mut self) {
        unsafe {
            xmlXPathFreeObject(self.ptr.as_ptr());
        }
    }
}

/// A parsed XML document with an attached XPath evaluation context
pub struct XmlDocument {
    doc: NonNull<XmlDoc>,
    xpath: NonNull<XmlXPathContext>,
}

impl XmlDocument {
    /// Parse a document from an in-memory buffer.
    ///
    /// Network access is disabled and libxml2 diagnostics are not printed.
    ///
    /// # Errors
    ///
    /// Returns `XmlError::EmptyDocument` for an empty buffer,
    /// `XmlError::DocumentTooLarge` if the buffer does not fit a C `int`,
    /// `XmlError::ParseFailed` if the content is not well-formed XML.
    pub fn parse(bytes: &[u8]) -> XmlResult<Self> {
        if bytes.is_empty() {
            return Err(XmlError::EmptyDocument);
        }
        let size = c_int::try_from(bytes.len())
            .map_err(|_| XmlError::DocumentTooLarge { size: bytes.len() })?;

        ensure_initialized();

        unsafe {
            let doc = xmlReadMemory(
                bytes.as_ptr() as *const c_char,
                size,
                std::ptr::null(),
                std::ptr::null(),
                PARSE_OPTIONS,
            );
            let doc = NonNull::new(doc).ok_or(XmlError::ParseFailed)?;

            let xpath = xmlXPathNewContext(doc.as_ptr());
            let Some(xpath) = NonNull::new(xpath) else {
                xmlFreeDoc(doc.as_ptr());
                return Err(XmlError::XPathContextFailed);
            };

            Ok(Self { doc, xpath })
        }
    }

    fn eval(&self, expression: &str) -> XmlResult<XPathResult> {
        let c_expression = CString::new(expression).map_err(|_| XmlError::InvalidExpression {
            expression: expression.to_string(),
        })?;

        let ptr = unsafe {
            xmlXPathEvalExpression(c_expression.as_ptr() as *const c_uchar, self.xpath.as_ptr())
        };

        NonNull::new(ptr)
            .map(|ptr| XPathResult { ptr })
            .ok_or_else(|| XmlError::XPathEvaluationFailed {
                expression: expression.to_string(),
            })
    }

    /// Number of nodes selected by a node-set expression
    pub fn count(&self, path: &str) -> XmlResult<usize> {
        let expression = format!("count({path})");
        let result = self.eval(&expression)?;
        let object = result.object();

        if object.kind != XPATH_NUMBER || !object.floatval.is_finite() || object.floatval < 0.0 {
            return Err(XmlError::UnexpectedResultType { expression });
        }
        Ok(object.floatval as usize)
    }

    /// XPath string-value of the first node selected by `path` (empty if none)
    pub fn string(&self, path: &str) -> XmlResult<String> {
        let expression = format!("string({path})");
        let result = self.eval(&expression)?;
        let object = result.object();

        if object.kind != XPATH_STRING {
            return Err(XmlError::UnexpectedResultType { expression });
        }
        if object.stringval.is_null() {
            return Ok(String::new());
        }

        // Safety: libxml2 strings are NUL-terminated UTF-8 and live as long as `result`.
        let value = unsafe { CStr::from_ptr(object.stringval as *const c_char) };
        Ok(value.to_string_lossy().into_owned())
    }

    /// Whether `path` selects at least one node
    pub fn exists(&self, path: &str) -> XmlResult<bool> {
        Ok(self.count(path)? > 0)
    }

    /// Value of the first attribute node selected by `path`, distinguishing an
    /// absent attribute (`None`) from an empty one (`Some("")`)
    pub fn attribute(&self, path: &str) -> XmlResult<Option<String>> {
        if !self.exists(path)? {
            return Ok(None);
        }
        self.string(path).map(Some)
    }
}

impl Drop for XmlDocument {
    fn drop(&mut self) {
        unsafe {
            xmlXPathFreeContext(self.xpath.as_ptr());
            xmlFreeDoc(self.doc.as_ptr());
        }
    }
}

impl std::fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlDocument").finish_non_exhaustive()
    }
}

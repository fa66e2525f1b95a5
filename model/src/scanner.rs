/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::error::ModelError;
use crate::field_value::FieldValue;
use crate::object::IdfObject;
use crate::Model;

/// Reads IDF text: objects are a type followed by comma-separated
/// values and terminated by `;`. Everything after a `!` is a comment.
pub(crate) struct IdfScanner<'a> {
    /// The line being read (initialized as 1 by default)
    line: usize,

    source: &'a [u8],

    current_index: usize,

    finished: bool,
}

impl<'a> IdfScanner<'a> {
    /// Creates a new [`IdfScanner`]
    pub(crate) fn new(source: &'a [u8], line: usize) -> Self {
        Self {
            finished: source.is_empty(),
            source,
            line,
            current_index: 0,
        }
    }

    fn make_error(&self, msg: &str) -> ModelError {
        ModelError::Syntax {
            line: self.line,
            msg: msg.to_string(),
        }
    }

    /// Advances one byte in the `source`, returning it. If finished, it
    /// will mark the [`IdfScanner`] as finished and return `None`
    fn advance(&mut self) -> Option<u8> {
        if let Some(v) = self.source.get(self.current_index) {
            self.current_index += 1;
            if self.current_index == self.source.len() {
                self.finished = true;
            }
            if *v == b'\n' {
                self.line += 1;
            }
            Some(*v)
        } else {
            self.finished = true;
            None
        }
    }

    /// Gets the byte at the `current_index`. Returns `\0` if
    /// finished.
    fn peek(&self) -> u8 {
        if self.finished {
            return b'\0';
        }
        self.source[self.current_index]
    }

    /// Consumes everything until the end of the line
    fn skip_comment(&mut self) {
        while !self.finished {
            if let Some(b'\n') = self.advance() {
                return;
            }
        }
    }

    /// Skips the white spaces and the comments
    fn skip_white_space(&mut self) {
        while !self.finished {
            match self.peek() {
                b' ' | b'\r' | b'\t' | b'\n' => {
                    self.advance();
                }
                b'!' => self.skip_comment(),
                _ => return,
            }
        }
    }

    /// Consumes one value, returning it along with the character that
    /// terminated it (i.e., `,` or `;`)
    fn value(&mut self) -> Result<(String, u8), ModelError> {
        let mut buf: Vec<u8> = Vec::new();
        loop {
            match self.advance() {
                None => return Err(self.make_error("Unexpected end of file (missing ';'?)")),
                Some(c @ (b',' | b';')) => {
                    let text = String::from_utf8_lossy(&buf).trim().to_string();
                    return Ok((text, c));
                }
                Some(b'!') => self.skip_comment(),
                Some(b'\n') | Some(b'\r') => {}
                Some(c) => buf.push(c),
            }
        }
    }

    /// Parses a whole [`Model`]
    pub(crate) fn parse_model(&mut self) -> Result<Model, ModelError> {
        let mut model = Model::default();

        loop {
            self.skip_white_space();
            if self.finished {
                break;
            }
            let ln = self.line;

            // Object type
            let (object_type, mut terminator) = self.value()?;
            if object_type.is_empty() {
                return Err(ModelError::Syntax {
                    line: ln,
                    msg: "found a value with no object type".to_string(),
                });
            }

            let mut values = Vec::new();
            while terminator != b';' {
                let (v, t) = self.value()?;
                values.push(FieldValue::from_idf(v));
                terminator = t;
            }

            let schema = model.object_schema(&object_type);
            let object = IdfObject::with_values(object_type, schema, values);
            model.push_object(object, false)?;
        }

        Ok(model)
    }
}

// Copyright (c) 2024-2026 the gridevents developers

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

/*!
Event model
===========

The typed entities every parser emits: zone and exchange keys, production and
storage mixes with their negative-value bookkeeping, the validated event
variants and the append-style lists that build them.

Events are created through the `create` factory of their variant, which
either returns a validated event or logs the failure and returns nothing, so
one bad data point never aborts a whole parser run. Lists own their events;
`to_list` produces the canonical dict forms consumed downstream.
*/

mod alert;
mod exchange;
mod key;
mod kind;
mod mix;
mod mode;
mod price;
mod production;
mod totals;

pub use alert::*;
pub use exchange::*;
pub use key::*;
pub use kind::*;
pub use mix::*;
pub use mode::*;
pub use price::*;
pub use production::*;
pub use totals::*;

// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Early exit with an error if a condition does not hold.
///
/// Without an error argument the enclosing function must return [Option] and exits with `None`.
///
/// ```
/// # use utils::ensure;
/// fn first_byte(hex: &str) -> Option<&str> {
///     ensure!(hex.len() >= 2);
///     hex.get(..2)
/// }
///
/// assert_eq!(first_byte("ab6807"), Some("ab"));
/// assert_eq!(first_byte("a"), None);
/// ```
///
/// With an error argument the enclosing function returns [Result]. The error expression is only
/// evaluated if the condition fails.
///
/// ```
/// # use utils::ensure;
/// # #[derive(PartialEq, Eq, Debug)]
/// enum PopError {
///     Underflow { required: usize, available: usize },
/// }
///
/// fn pop_two(stack: &mut Vec<u8>) -> Result<(u8, u8), PopError> {
///     ensure!(
///         stack.len() >= 2,
///         PopError::Underflow { required: 2, available: stack.len() }
///     );
///     let b = stack.pop().unwrap_or_default();
///     let a = stack.pop().unwrap_or_default();
///     Ok((a, b))
/// }
///
/// assert_eq!(pop_two(&mut vec![1, 2, 3]), Ok((2, 3)));
/// assert_eq!(
///     pop_two(&mut vec![1]),
///     Err(PopError::Underflow { required: 2, available: 1 })
/// );
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $cond.then(|| ())?
    };
    ($cond:expr, $err:expr $(,)?) => {
        $cond.then(|| ()).ok_or_else(|| $err)?
    };
}

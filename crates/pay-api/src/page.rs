//! # Checkout Page
//!
//! The static document served at `GET /`. Clicking the button creates a
//! session through `POST /checkout` and hands its id to Stripe.js, which
//! redirects the browser to the hosted checkout.

const TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Checkout</title>
    <script src="https://js.stripe.com/v3/"></script>
  </head>
  <body style="font-family: system-ui; display: flex; flex-direction: column; align-items: center; margin-top: 20vh;">
    <h1>Checkout!</h1>
    <button id="checkout-btn">Checkout</button>

    <script>
      const stripe = Stripe(__PUBLISHABLE_KEY__);
      const checkoutBtn = document.querySelector("#checkout-btn");
      checkoutBtn.addEventListener("click", async (e) => {
        e.preventDefault();
        const response = await fetch("/checkout", {
          method: "POST",
          headers: {
            "Content-Type": "application/json",
          },
        });

        if (!response.ok) {
          alert(await response.text());
          return;
        }

        const { id } = await response.json();
        await stripe.redirectToCheckout({ sessionId: id });
      });
    </script>
  </body>
</html>
"##;

/// Render the page with `publishable_key` baked into the Stripe.js initializer.
pub fn render_checkout_page(publishable_key: &str) -> String {
    TEMPLATE.replace("__PUBLISHABLE_KEY__", &js_string(publishable_key))
}

/// Quote `value` as a JavaScript string literal safe inside a `<script>` block
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
